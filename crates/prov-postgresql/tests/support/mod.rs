//! Colaboradores simulados: desplegador y base de datos transaccional.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use prov_azure::{ArmDeployer, DeploymentError, DeploymentOutputs, DeploymentParameters};
use prov_persistence::{AdminConnectionConfig, PersistenceError, SessionProvider, SqlSession};
use prov_postgresql::{PostgresqlModule, PostgresqlSettings};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct DeployCall {
    pub deployment_name: String,
    pub resource_group_name: String,
    pub location: String,
    pub parameters: DeploymentParameters,
}

/// Devuelve siempre las mismas salidas y registra cada llamada.
pub struct StubDeployer {
    outputs: Result<DeploymentOutputs, String>,
    pub calls: Mutex<Vec<DeployCall>>,
}

impl StubDeployer {
    pub fn returning(outputs: Value) -> Self {
        let outputs = match outputs {
            Value::Object(m) => m,
            other => panic!("outputs must be an object, got {other}"),
        };
        Self { outputs: Ok(outputs),
               calls: Mutex::new(Vec::new()) }
    }

    pub fn failing(reason: &str) -> Self {
        Self { outputs: Err(reason.to_string()),
               calls: Mutex::new(Vec::new()) }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl ArmDeployer for StubDeployer {
    fn deploy(&self,
              deployment_name: &str,
              resource_group_name: &str,
              location: &str,
              template: &[u8],
              parameters: &DeploymentParameters)
              -> Result<DeploymentOutputs, DeploymentError> {
        assert!(!template.is_empty());
        self.calls.lock().unwrap().push(DeployCall { deployment_name: deployment_name.to_string(),
                                                     resource_group_name: resource_group_name.to_string(),
                                                     location: location.to_string(),
                                                     parameters: parameters.clone() });
        self.outputs.clone().map_err(DeploymentError::Failed)
    }
}

/// Estado compartido de la base simulada: sentencias confirmadas y traza de
/// todas las operaciones.
#[derive(Debug, Default)]
pub struct FakeDatabase {
    pub committed: Vec<String>,
    pub trace: Vec<String>,
    pub opened: Vec<AdminConnectionConfig>,
    pub open_sessions: usize,
}

/// Proveedor de sesiones simuladas. `fail_on` hace fallar la primera
/// sentencia que contenga ese texto.
#[derive(Clone, Default)]
pub struct FakeSessions {
    pub db: Arc<Mutex<FakeDatabase>>,
    pub fail_on: Option<&'static str>,
    pub fail_rollback: bool,
    pub refuse_connections: bool,
}

impl FakeSessions {
    pub fn failing_on(fragment: &'static str) -> Self {
        Self { fail_on: Some(fragment),
               ..Default::default() }
    }

    pub fn committed(&self) -> Vec<String> {
        self.db.lock().unwrap().committed.clone()
    }

    pub fn trace(&self) -> Vec<String> {
        self.db.lock().unwrap().trace.clone()
    }

    pub fn open_sessions(&self) -> usize {
        self.db.lock().unwrap().open_sessions
    }
}

pub struct FakeSession {
    db: Arc<Mutex<FakeDatabase>>,
    fail_on: Option<&'static str>,
    fail_rollback: bool,
    pending: Vec<String>,
}

impl SessionProvider for FakeSessions {
    type Session = FakeSession;

    fn open(&self, config: &AdminConnectionConfig) -> Result<FakeSession, PersistenceError> {
        if self.refuse_connections {
            return Err(PersistenceError::Connection("connection refused".into()));
        }
        let mut db = self.db.lock().unwrap();
        db.opened.push(config.clone());
        db.open_sessions += 1;
        Ok(FakeSession { db: Arc::clone(&self.db),
                         fail_on: self.fail_on,
                         fail_rollback: self.fail_rollback,
                         pending: Vec::new() })
    }
}

impl SqlSession for FakeSession {
    fn begin(&mut self) -> Result<(), PersistenceError> {
        self.db.lock().unwrap().trace.push("BEGIN".into());
        Ok(())
    }

    fn execute(&mut self, sql: &str) -> Result<(), PersistenceError> {
        self.db.lock().unwrap().trace.push(sql.to_string());
        if let Some(fragment) = self.fail_on {
            if sql.contains(fragment) {
                return Err(PersistenceError::Database(format!("injected failure on '{fragment}'")));
            }
        }
        self.pending.push(sql.to_string());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        let mut db = self.db.lock().unwrap();
        db.trace.push("COMMIT".into());
        db.committed.append(&mut self.pending);
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PersistenceError> {
        self.db.lock().unwrap().trace.push("ROLLBACK".into());
        self.pending.clear();
        if self.fail_rollback {
            return Err(PersistenceError::TransientIo("connection closed during rollback".into()));
        }
        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        if let Ok(mut db) = self.db.lock() {
            db.open_sessions -= 1;
        }
    }
}

pub fn fqdn_outputs(fqdn: &str) -> Value {
    serde_json::json!({ "fullyQualifiedDomainName": fqdn })
}

pub fn module(deployer: StubDeployer,
              sessions: FakeSessions)
              -> (PostgresqlModule<StubDeployer, FakeSessions>, Arc<StubDeployer>, FakeSessions) {
    let deployer = Arc::new(deployer);
    let module = PostgresqlModule::new(Arc::clone(&deployer), Arc::new(sessions.clone()), PostgresqlSettings::default());
    (module, deployer, sessions)
}
