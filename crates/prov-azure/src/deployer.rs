//! Contrato del desplegador de plantillas de infraestructura.
//!
//! El motor de despliegue es un colaborador externo: recibe nombre de
//! despliegue, grupo de recursos, región, plantilla y mapa de parámetros, y
//! devuelve las salidas nombradas o falla. Este crate sólo define la forma
//! del contrato y utilidades para leer salidas.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

/// Parámetros de despliegue (orden de inserción estable).
pub type DeploymentParameters = IndexMap<String, Value>;

/// Salidas nombradas de un despliegue exitoso.
pub type DeploymentOutputs = Map<String, Value>;

#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("deployment rejected by control plane: {0}")]
    Rejected(String),
    #[error("deployment failed: {0}")]
    Failed(String),
    #[error("deployer unavailable: {0}")]
    Unavailable(String),
}

/// Desplegador de plantillas. Las implementaciones deben poder compartirse
/// entre peticiones concurrentes.
pub trait ArmDeployer: Send + Sync {
    fn deploy(&self,
              deployment_name: &str,
              resource_group_name: &str,
              location: &str,
              template: &[u8],
              parameters: &DeploymentParameters)
              -> Result<DeploymentOutputs, DeploymentError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    #[error("output '{0}' missing from deployment")]
    Missing(String),
    #[error("output '{key}' has unexpected type {found}, expected string")]
    WrongType { key: String, found: &'static str },
    #[error("output '{0}' is empty")]
    Empty(String),
}

/// Lee una salida string no vacía.
pub fn output_string<'o>(outputs: &'o DeploymentOutputs, key: &str) -> Result<&'o str, OutputError> {
    match outputs.get(key) {
        None => Err(OutputError::Missing(key.to_string())),
        Some(Value::String(s)) if s.is_empty() => Err(OutputError::Empty(key.to_string())),
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(OutputError::WrongType { key: key.to_string(),
                                                    found: json_type_name(other) }),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
