//! Ajustes del módulo leídos del entorno.

use std::env;

use prov_persistence::{init_dotenv, ConnectionDefaults};

pub const DEFAULT_ADMINISTRATOR_LOGIN: &str = "postgres";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresqlSettings {
    /// Rol administrativo creado por la plantilla y usado por `setupDatabase`.
    pub administrator_login: String,
    pub connection: ConnectionDefaults,
}

impl Default for PostgresqlSettings {
    fn default() -> Self {
        Self { administrator_login: DEFAULT_ADMINISTRATOR_LOGIN.to_string(),
               connection: ConnectionDefaults::default() }
    }
}

impl PostgresqlSettings {
    /// `PROVFLOW_PG_ADMIN_LOGIN` más los valores de conexión.
    pub fn from_env() -> Self {
        init_dotenv();
        let administrator_login = match env::var("PROVFLOW_PG_ADMIN_LOGIN") {
            Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => DEFAULT_ADMINISTRATOR_LOGIN.to_string(),
        };
        Self { administrator_login,
               connection: ConnectionDefaults::from_env() }
    }

    /// Usuario de conexión con el formato `login@servidor` de la plataforma.
    pub fn connection_user(&self, server_name: &str) -> String {
        format!("{}@{}", self.administrator_login, server_name)
    }
}
