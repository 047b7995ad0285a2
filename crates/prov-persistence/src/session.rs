//! Contrato de sesión SQL.
//!
//! Permite:
//! - Usar una conexión Postgres real (`pg::PgSession`).
//! - Simular la base de datos en tests sin acoplar a Diesel.

use crate::config::AdminConnectionConfig;
use crate::error::PersistenceError;

/// Primitivas mínimas: sentencias sueltas más control de transacción.
pub trait SqlSession {
    fn begin(&mut self) -> Result<(), PersistenceError>;
    fn execute(&mut self, sql: &str) -> Result<(), PersistenceError>;
    fn commit(&mut self) -> Result<(), PersistenceError>;
    fn rollback(&mut self) -> Result<(), PersistenceError>;
}

/// Abre sesiones contra un servidor. La sesión devuelta es dueña de la
/// conexión: soltarla libera la conexión.
pub trait SessionProvider: Send + Sync {
    type Session: SqlSession;

    fn open(&self, config: &AdminConnectionConfig) -> Result<Self::Session, PersistenceError>;
}
