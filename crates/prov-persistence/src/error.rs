//! Errores de persistencia.
//! Mapea errores de Diesel / conexión a variantes semánticas. La decisión de
//! reintentar es del llamador; `is_transient` sólo clasifica.

use diesel::result::{ConnectionError, DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unique violation: {0}")]
    UniqueViolation(String),
    #[error("check violation: {0}")]
    CheckViolation(String),
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),
    #[error("not found")]
    NotFound,
    #[error("serialization conflict (retryable)")]
    SerializationConflict,
    #[error("transient IO / connection error: {0}")]
    TransientIo(String),
    #[error("transaction state error: {0}")]
    Transaction(String),
    #[error("database error: {0}")]
    Database(String),
}

impl PersistenceError {
    /// Determina si un error es transitorio (el llamador puede reintentar).
    ///
    /// Cubre conflictos de serialización, errores de IO de conexión y
    /// mensajes comunes de desconexión/timeout detectados por texto.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::SerializationConflict | Self::TransientIo(_) => true,
            Self::Connection(msg) | Self::Database(msg) => {
                let m = msg.to_lowercase();
                m.contains("deadlock detected")
                || m.contains("could not serialize access due to concurrent update")
                || m.contains("terminating connection due to administrator command")
                || m.contains("connection closed")
                || m.contains("connection refused")
                || m.contains("timeout")
            }
            _ => false,
        }
    }
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation => Self::UniqueViolation(info.message().to_string()),
                DatabaseErrorKind::CheckViolation => Self::CheckViolation(info.message().to_string()),
                DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(info.message().to_string()),
                DatabaseErrorKind::SerializationFailure => Self::SerializationConflict,
                DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
                    Self::TransientIo(info.message().to_string())
                }
                other => Self::Database(format!("db error kind {:?}: {}", other, info.message())),
            },
            DieselError::AlreadyInTransaction => Self::Transaction("already in transaction".into()),
            DieselError::NotInTransaction => Self::Transaction("not in transaction".into()),
            DieselError::BrokenTransactionManager => Self::TransientIo("broken transaction manager".into()),
            DieselError::RollbackErrorOnCommit { rollback_error,
                                                 commit_error, } => {
                Self::Transaction(format!("rollback={rollback_error}; commit={commit_error}"))
            }
            other => Self::Database(format!("unhandled diesel error: {other}")),
        }
    }
}

impl From<ConnectionError> for PersistenceError {
    fn from(err: ConnectionError) -> Self {
        Self::Connection(err.to_string())
    }
}
