//! Configuración de conexión.
//!
//! Los valores por defecto se leen de variables de entorno (con `.env`
//! cargado una sola vez). Valores ausentes o mal formados caen al default.

use std::env;
use std::fmt;
use std::str::FromStr;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionDefaults {
    pub port: u16,
    pub sslmode: String,
    pub connect_timeout_secs: u32,
    /// Base a la que se conecta la sesión administrativa.
    pub admin_database: String,
}

impl Default for ConnectionDefaults {
    fn default() -> Self {
        Self { port: 5432,
               sslmode: "require".to_string(),
               connect_timeout_secs: 30,
               admin_database: "postgres".to_string() }
    }
}

impl ConnectionDefaults {
    /// `PROVFLOW_PG_PORT`, `PROVFLOW_PG_SSLMODE`, `PROVFLOW_PG_CONNECT_TIMEOUT`,
    /// `PROVFLOW_PG_ADMIN_DATABASE`.
    pub fn from_env() -> Self {
        init_dotenv();
        let d = Self::default();
        Self { port: env_or("PROVFLOW_PG_PORT", d.port),
               sslmode: env_or("PROVFLOW_PG_SSLMODE", d.sslmode),
               connect_timeout_secs: env_or("PROVFLOW_PG_CONNECT_TIMEOUT", d.connect_timeout_secs),
               admin_database: env_or("PROVFLOW_PG_ADMIN_DATABASE", d.admin_database) }
    }
}

/// Sesión administrativa contra un servidor concreto.
///
/// `Debug` oculta la contraseña; `to_conninfo` no debe loguearse.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub sslmode: String,
    pub connect_timeout_secs: u32,
}

impl AdminConnectionConfig {
    pub fn new(host: impl Into<String>,
               user: impl Into<String>,
               password: impl Into<String>,
               defaults: &ConnectionDefaults)
               -> Self {
        Self { host: host.into(),
               port: defaults.port,
               database: defaults.admin_database.clone(),
               user: user.into(),
               password: password.into(),
               sslmode: defaults.sslmode.clone(),
               connect_timeout_secs: defaults.connect_timeout_secs }
    }

    /// Cadena `key=value` de libpq con cada valor entre comillas simples.
    pub fn to_conninfo(&self) -> String {
        format!("host={} port={} dbname={} user={} password={} sslmode={} connect_timeout={}",
                conninfo_value(&self.host),
                self.port,
                conninfo_value(&self.database),
                conninfo_value(&self.user),
                conninfo_value(&self.password),
                conninfo_value(&self.sslmode),
                self.connect_timeout_secs)
    }
}

impl fmt::Debug for AdminConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConnectionConfig")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("database", &self.database)
         .field("user", &self.user)
         .field("password", &"<redacted>")
         .field("sslmode", &self.sslmode)
         .field("connect_timeout_secs", &self.connect_timeout_secs)
         .finish()
    }
}

fn conninfo_value(v: &str) -> String {
    format!("'{}'", v.replace('\\', "\\\\").replace('\'', "\\'"))
}
