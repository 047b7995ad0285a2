//! Reconstrucción (`replay`) del estado de una ejecución a partir de sus
//! eventos.
//!
//! El replay es lineal: consume eventos en orden y actualiza un slot por
//! step. Sirve para diagnóstico y para localizar, por nombre, el punto desde
//! el que una ejecución podría reanudarse.
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::event::{ProvisionEvent, ProvisionEventKind};
use crate::step::StepStatus;

/// Estado de un step dentro de la ejecución.
#[derive(Debug, Clone)]
pub struct StepSlot {
    pub step_id: String,
    pub status: StepStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub run_id: Uuid,
    pub definition_hash: Option<String>,
    pub steps: Vec<StepSlot>,
    /// Índice del primer step que no terminó correctamente.
    pub cursor: usize,
    pub completed: bool,
}

impl RunSnapshot {
    pub fn replay<S: AsRef<str>>(run_id: Uuid, step_ids: &[S], events: &[ProvisionEvent]) -> Self {
        let mut steps: Vec<StepSlot> = step_ids.iter()
                                               .map(|id| StepSlot { step_id: id.as_ref().to_string(),
                                                                    status: StepStatus::Pending,
                                                                    started_at: None,
                                                                    finished_at: None,
                                                                    error: None })
                                               .collect();
        let mut definition_hash = None;
        let mut completed = false;
        for ev in events.iter().filter(|e| e.run_id == run_id) {
            match &ev.kind {
                ProvisionEventKind::ProvisioningInitialized { definition_hash: h, .. } => {
                    definition_hash = Some(h.clone());
                }
                ProvisionEventKind::StepStarted { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Running;
                        slot.started_at = Some(ev.ts);
                    }
                }
                ProvisionEventKind::StepFinished { step_index, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Finished;
                        slot.finished_at = Some(ev.ts);
                    }
                }
                ProvisionEventKind::StepFailed { step_index, error, .. } => {
                    if let Some(slot) = steps.get_mut(*step_index) {
                        slot.status = StepStatus::Failed;
                        slot.finished_at = Some(ev.ts);
                        slot.error = Some(error.clone());
                    }
                }
                ProvisionEventKind::ProvisioningCompleted { .. } => completed = true,
            }
        }
        let cursor = steps.iter()
                          .position(|s| s.status != StepStatus::Finished)
                          .unwrap_or(steps.len());
        Self { run_id,
               definition_hash,
               steps,
               cursor,
               completed }
    }

    /// Step que falló, si lo hay.
    pub fn failed_step(&self) -> Option<&StepSlot> {
        self.steps.iter().find(|s| s.status == StepStatus::Failed)
    }

    /// Nombre del step desde el que habría que reanudar.
    pub fn resume_point(&self) -> Option<&str> {
        self.steps.get(self.cursor).map(|s| s.step_id.as_str())
    }
}
