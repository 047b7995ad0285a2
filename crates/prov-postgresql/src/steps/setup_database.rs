use std::sync::Arc;

use log::{debug, info};
use prov_core::{ProvisioningStep, StepError};
use prov_persistence::sql::{quote_identifier, quote_literal};
use prov_persistence::{run_in_transaction, AdminConnectionConfig, SessionProvider};

use super::{require, SETUP_DATABASE};
use crate::error::PostgresqlError;
use crate::settings::PostgresqlSettings;
use crate::types::{PostgresqlProvisioningContext, PostgresqlProvisioningParameters};

/// Las tres sentencias de preparación, en orden: crear el rol (si no
/// existe), concederlo al rol administrativo y transferirle la propiedad de
/// la base ya creada por la plantilla.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStatements {
    pub create_role: String,
    pub grant_role: String,
    pub transfer_ownership: String,
}

impl SetupStatements {
    pub fn new(database_name: &str, administrator_login: &str) -> Self {
        let role = quote_identifier(database_name);
        Self { create_role: format!("DO $$ BEGIN IF NOT EXISTS (SELECT 1 FROM pg_catalog.pg_roles WHERE rolname = {}) \
                                     THEN CREATE ROLE {}; END IF; END $$",
                                    quote_literal(database_name),
                                    role),
               grant_role: format!("GRANT {} TO {}", role, quote_identifier(administrator_login)),
               transfer_ownership: format!("ALTER DATABASE {} OWNER TO {}", role, role) }
    }
}

/// Longitud máxima de un identificador en Postgres (NAMEDATALEN - 1).
const MAX_ROLE_NAME_LEN: usize = 63;

/// Nombre aceptable como rol y base: `[A-Za-z0-9_]`, hasta 63 bytes. Cubre
/// los identificadores generados y bases existentes con otros nombres; el
/// `$` queda fuera porque el bloque `DO` va entre `$$`.
pub fn is_role_name(name: &str) -> bool {
    !name.is_empty()
    && name.len() <= MAX_ROLE_NAME_LEN
    && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Prepara la base recién desplegada. La sesión se abre y se cierra dentro
/// del step; nunca se mantiene entre steps.
pub struct SetupDatabaseStep<S> {
    sessions: Arc<S>,
    settings: PostgresqlSettings,
}

impl<S: SessionProvider> SetupDatabaseStep<S> {
    pub fn new(sessions: Arc<S>, settings: PostgresqlSettings) -> Self {
        Self { sessions, settings }
    }

    /// Ejecuta las sentencias en una única transacción. Devuelve `Ok` sólo
    /// tras el commit.
    pub fn setup(&self, context: &PostgresqlProvisioningContext) -> Result<(), PostgresqlError> {
        let host = require(&context.fully_qualified_domain_name, "fullyQualifiedDomainName")?;
        let server = require(&context.server_name, "serverName")?;
        let password = require(&context.administrator_login_password, "administratorLoginPassword")?;
        let database = require(&context.database_name, "databaseName")?;
        if !is_role_name(database) {
            return Err(PostgresqlError::InvalidDatabaseName(database.to_string()));
        }

        let config = AdminConnectionConfig::new(host,
                                                self.settings.connection_user(server),
                                                password,
                                                &self.settings.connection);
        let mut session = self.sessions.open(&config).map_err(PostgresqlError::Connect)?;
        let admin = self.settings.administrator_login.as_str();
        let statements = SetupStatements::new(database, admin);

        debug!("setupDatabase: host={} role={}", host, database);
        run_in_transaction::<_, (), PostgresqlError, _>(&mut session, |tx| {
            tx.execute(&statements.create_role)
              .map_err(|source| PostgresqlError::CreateRole { role: database.to_string(),
                                                              source })?;
            tx.execute(&statements.grant_role)
              .map_err(|source| PostgresqlError::GrantRole { role: database.to_string(),
                                                             admin: admin.to_string(),
                                                             source })?;
            tx.execute(&statements.transfer_ownership)
              .map_err(|source| PostgresqlError::TransferOwnership { database: database.to_string(),
                                                                     source })?;
            Ok(())
        })?;
        info!("setupDatabase: role {} owns database on {}", database, host);
        Ok(())
    }
}

impl<S: SessionProvider> ProvisioningStep<PostgresqlProvisioningContext, PostgresqlProvisioningParameters>
    for SetupDatabaseStep<S>
{
    fn id(&self) -> &str {
        SETUP_DATABASE
    }

    fn run(&self,
           context: &PostgresqlProvisioningContext,
           _params: &PostgresqlProvisioningParameters)
           -> Result<PostgresqlProvisioningContext, StepError> {
        self.setup(context)?;
        Ok(context.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_beyond_generated_identifiers() {
        assert!(is_role_name("abc1234567"));
        assert!(is_role_name("1legacy_db"));
        assert!(is_role_name("Orders"));
        assert!(!is_role_name(""));
        assert!(!is_role_name("a$$b"));
        assert!(!is_role_name("a\"; DROP ROLE x; --"));
        assert!(!is_role_name(&"a".repeat(64)));
    }

    #[test]
    fn statements_quote_role_and_admin() {
        let s = SetupStatements::new("abc1234567", "postgres");
        assert!(s.create_role.contains("rolname = 'abc1234567'"));
        assert!(s.create_role.contains("CREATE ROLE \"abc1234567\";"));
        assert_eq!(s.grant_role, "GRANT \"abc1234567\" TO \"postgres\"");
        assert_eq!(s.transfer_ownership, "ALTER DATABASE \"abc1234567\" OWNER TO \"abc1234567\"");
    }
}
