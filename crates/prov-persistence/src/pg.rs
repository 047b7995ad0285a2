//! Implementación Postgres (Diesel) del contrato de sesión.
//!
//! - Cada `PgSession` es dueña de una única `PgConnection`; soltar la sesión
//!   cierra la conexión.
//! - El control de transacción usa el `AnsiTransactionManager` de Diesel
//!   (BEGIN / COMMIT / ROLLBACK) para poder separar el commit del rollback y
//!   no enmascarar el error original con uno de rollback.

use diesel::connection::{AnsiTransactionManager, SimpleConnection, TransactionManager};
use diesel::pg::PgConnection;
use diesel::Connection;
use log::debug;

use crate::config::AdminConnectionConfig;
use crate::error::PersistenceError;
use crate::session::{SessionProvider, SqlSession};

pub struct PgSession {
    conn: PgConnection,
}

impl PgSession {
    /// Abre una sesión a partir de una URL (`postgres://...`) o conninfo.
    pub fn establish(database_url: &str) -> Result<Self, PersistenceError> {
        let conn = PgConnection::establish(database_url)?;
        Ok(Self { conn })
    }

    /// Acceso a la conexión subyacente (consultas de verificación).
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}

impl SqlSession for PgSession {
    fn begin(&mut self) -> Result<(), PersistenceError> {
        <AnsiTransactionManager as TransactionManager<PgConnection>>::begin_transaction(&mut self.conn)?;
        Ok(())
    }

    fn execute(&mut self, sql: &str) -> Result<(), PersistenceError> {
        self.conn.batch_execute(sql)?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), PersistenceError> {
        <AnsiTransactionManager as TransactionManager<PgConnection>>::commit_transaction(&mut self.conn)?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<(), PersistenceError> {
        <AnsiTransactionManager as TransactionManager<PgConnection>>::rollback_transaction(&mut self.conn)?;
        Ok(())
    }
}

/// Proveedor de sesiones que abre una conexión nueva por `open`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgSessionProvider;

impl SessionProvider for PgSessionProvider {
    type Session = PgSession;

    fn open(&self, config: &AdminConnectionConfig) -> Result<PgSession, PersistenceError> {
        debug!("open:start host={} database={} user={}",
               config.host,
               config.database,
               config.user);
        let session = PgSession::establish(&config.to_conninfo())?;
        debug!("open:done host={}", config.host);
        Ok(session)
    }
}
