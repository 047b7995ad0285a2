//! prov-persistence
//!
//! Ejecución transaccional de sentencias contra el servidor de base de datos
//! recién desplegado. La conexión y la transacción viven sólo dentro del step
//! que las abre: se adquieren, se usan y se liberan en todos los caminos de
//! salida.
//!
//! Módulos:
//! - `config`: valores por defecto de conexión desde `.env` y configuración
//!   de la sesión administrativa.
//! - `session`: contrato `SqlSession` / `SessionProvider`.
//! - `pg`: implementación Postgres (Diesel).
//! - `transaction`: guardia RAII con rollback explícito.
//! - `sql`: quoting de identificadores y literales.

pub mod config;
pub mod error;
pub mod pg;
pub mod session;
pub mod sql;
pub mod transaction;

pub use config::{init_dotenv, AdminConnectionConfig, ConnectionDefaults};
pub use error::PersistenceError;
pub use pg::{PgSession, PgSessionProvider};
pub use session::{SessionProvider, SqlSession};
pub use transaction::{run_in_transaction, TransactionGuard};
