//! Ejecución paso a paso de un `Provisioner`.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::engine::Provisioner;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, ProvisionEvent, ProvisionEventKind};
use crate::model::{ProvisioningContext, ProvisioningParameters};
use crate::repo::RunSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Quedan steps por ejecutar.
    InProgress,
    /// Todos los steps terminaron correctamente.
    Completed,
    /// Un step falló; no se ejecutará ningún otro.
    Failed,
}

/// Una ejecución concreta de un `Provisioner`.
///
/// El llamador entrega los parámetros una sola vez y avanza con `step`,
/// recibiendo el contexto actualizado tras cada paso. Si un step falla, la
/// ejecución conserva el último contexto aceptado y queda en `Failed`.
pub struct ProvisioningRun<'a, C, P, E: EventStore> {
    provisioner: &'a Provisioner<C, P>,
    params: &'a P,
    context: C,
    cursor: usize,
    status: RunStatus,
    run_id: Uuid,
    event_store: E,
}

impl<'a, C, P, E> ProvisioningRun<'a, C, P, E>
    where C: ProvisioningContext,
          P: ProvisioningParameters,
          E: EventStore
{
    pub(crate) fn new(provisioner: &'a Provisioner<C, P>,
                      run_id: Uuid,
                      context: C,
                      params: &'a P,
                      mut event_store: E)
                      -> Self {
        event_store.append_kind(run_id,
                                ProvisionEventKind::ProvisioningInitialized { definition_hash:
                                                                                  provisioner.definition_hash()
                                                                                             .to_string(),
                                                                              step_count: provisioner.len() });
        Self { provisioner,
               params,
               context,
               cursor: 0,
               status: RunStatus::InProgress,
               run_id,
               event_store }
    }

    /// Ejecuta el siguiente step y devuelve el contexto resultante.
    pub fn step(&mut self) -> Result<&C, CoreEngineError> {
        self.advance()?;
        Ok(&self.context)
    }

    /// Ejecuta hasta `n` steps o hasta completar.
    pub fn run_n(&mut self, n: usize) -> Result<&C, CoreEngineError> {
        for _ in 0..n {
            match self.advance() {
                Ok(()) => continue,
                Err(CoreEngineError::ProvisioningCompleted) => break,
                Err(e) => return Err(e),
            }
        }
        Ok(&self.context)
    }

    /// Ejecuta los steps restantes y devuelve el contexto terminal.
    pub fn run_to_completion(mut self) -> Result<C, CoreEngineError> {
        loop {
            match self.advance() {
                Ok(()) => continue,
                Err(CoreEngineError::ProvisioningCompleted) => return Ok(self.context),
                Err(e) => return Err(e),
            }
        }
    }

    fn advance(&mut self) -> Result<(), CoreEngineError> {
        match self.status {
            RunStatus::Completed => return Err(CoreEngineError::ProvisioningCompleted),
            RunStatus::Failed => return Err(CoreEngineError::ProvisioningHasFailed),
            RunStatus::InProgress => {}
        }
        let provisioner = self.provisioner;
        let cursor = self.cursor;
        let step = provisioner.step_at(cursor)
                              .ok_or(CoreEngineError::ProvisioningCompleted)?;
        let step_id = step.id().to_string();

        self.event_store.append_kind(self.run_id,
                                     ProvisionEventKind::StepStarted { step_index: cursor,
                                                                       step_id: step_id.clone() });
        debug!("run={} step={} index={} started", self.run_id, step_id, cursor);

        let next = match step.run(&self.context, self.params) {
            Ok(next) => next,
            Err(source) => {
                warn!("run={} step={} failed: {}", self.run_id, step_id, source);
                self.fail(cursor, &step_id, source.to_string());
                return Err(CoreEngineError::StepFailed { step_index: cursor,
                                                         step_id,
                                                         source });
            }
        };

        if let Err(detail) = next.check_progress(&self.context) {
            warn!("run={} step={} regressed context: {}", self.run_id, step_id, detail);
            self.fail(cursor, &step_id, detail.clone());
            return Err(CoreEngineError::ContextRegression { step_id, detail });
        }

        self.context = next;
        self.cursor += 1;
        self.event_store.append_kind(self.run_id,
                                     ProvisionEventKind::StepFinished { step_index: cursor,
                                                                        step_id: step_id.clone() });
        debug!("run={} step={} index={} finished", self.run_id, step_id, cursor);

        if self.cursor == provisioner.len() {
            self.status = RunStatus::Completed;
            self.event_store.append_kind(self.run_id,
                                         ProvisionEventKind::ProvisioningCompleted { definition_hash:
                                                                                         provisioner.definition_hash()
                                                                                                    .to_string() });
            info!("run={} completed {} steps", self.run_id, provisioner.len());
        }
        Ok(())
    }

    fn fail(&mut self, step_index: usize, step_id: &str, error: String) {
        self.status = RunStatus::Failed;
        self.event_store.append_kind(self.run_id,
                                     ProvisionEventKind::StepFailed { step_index,
                                                                      step_id: step_id.to_string(),
                                                                      error });
    }

    /// Contexto actual (el último aceptado si un step falló).
    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Devuelve contexto y store de eventos.
    pub fn into_parts(self) -> (C, E) {
        (self.context, self.event_store)
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Índice del próximo step a ejecutar.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Nombre del próximo step, si la ejecución sigue en curso.
    pub fn next_step_id(&self) -> Option<&str> {
        match self.status {
            RunStatus::InProgress => self.provisioner.step_at(self.cursor).map(|s| s.id()),
            _ => None,
        }
    }

    pub fn events(&self) -> Vec<ProvisionEvent> {
        self.event_store.list(self.run_id)
    }

    /// Estado reconstruido desde los eventos registrados.
    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot::replay(self.run_id, &self.provisioner.step_ids(), &self.events())
    }
}
