//! Transacción con guardia RAII.
//!
//! `TransactionGuard` garantiza que una transacción abierta se revierte en
//! cualquier camino de salida, incluido un panic durante el trabajo. La
//! función `run_in_transaction` agrupa el patrón completo:
//! - BEGIN; ejecutar `work`.
//! - Éxito: COMMIT antes de devolver.
//! - Error: ROLLBACK explícito. Si el rollback también falla, se loguea como
//!   evento secundario y se devuelve el error original.

use std::fmt::Display;

use log::{debug, error, warn};

use crate::error::PersistenceError;
use crate::session::SqlSession;

pub struct TransactionGuard<'s, S: SqlSession> {
    session: &'s mut S,
    open: bool,
}

impl<'s, S: SqlSession> TransactionGuard<'s, S> {
    pub fn begin(session: &'s mut S) -> Result<Self, PersistenceError> {
        session.begin()?;
        Ok(Self { session, open: true })
    }

    pub fn execute(&mut self, sql: &str) -> Result<(), PersistenceError> {
        self.session.execute(sql)
    }

    /// Confirma la transacción. Tras un COMMIT fallido el servidor ya la ha
    /// descartado, así que la guardia no intenta otro rollback.
    pub fn commit(mut self) -> Result<(), PersistenceError> {
        self.open = false;
        self.session.commit()
    }

    pub fn rollback(mut self) -> Result<(), PersistenceError> {
        self.open = false;
        self.session.rollback()
    }
}

impl<S: SqlSession> Drop for TransactionGuard<'_, S> {
    fn drop(&mut self) {
        if self.open {
            warn!("transaction guard dropped while open, rolling back");
            if let Err(e) = self.session.rollback() {
                error!("rollback on drop failed: {e}");
            }
        }
    }
}

pub fn run_in_transaction<S, T, E, F>(session: &mut S, work: F) -> Result<T, E>
    where S: SqlSession,
          E: From<PersistenceError> + Display,
          F: FnOnce(&mut TransactionGuard<'_, S>) -> Result<T, E>
{
    let mut guard = TransactionGuard::begin(session)?;
    match work(&mut guard) {
        Ok(value) => {
            guard.commit()?;
            debug!("transaction committed");
            Ok(value)
        }
        Err(primary) => {
            if let Err(rollback_error) = guard.rollback() {
                error!("rollback failed after '{primary}': {rollback_error}");
            } else {
                debug!("transaction rolled back after '{primary}'");
            }
            Err(primary)
        }
    }
}
