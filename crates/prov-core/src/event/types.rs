//! Tipos de evento del aprovisionamiento y estructura `ProvisionEvent`.
//!
//! Rol en el flujo:
//! - Cada `ProvisioningRun` emite eventos a un `EventStore` append-only.
//! - Los eventos sólo llevan índices, nombres de step y texto de error; nunca
//!   valores del contexto (que puede contener secretos).
//! - Con ellos se reconstruye un `RunSnapshot` para diagnóstico y, a futuro,
//!   para reanudar por nombre de step.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisionEventKind {
    /// Primer evento de una ejecución: fija la definición y su tamaño.
    ProvisioningInitialized { definition_hash: String, step_count: usize },
    /// Un step comenzó su ejecución. No implica éxito.
    StepStarted { step_index: usize, step_id: String },
    /// Un step terminó correctamente y su contexto fue aceptado.
    StepFinished { step_index: usize, step_id: String },
    /// Un step terminó con error. La ejecución no continúa (stop-on-failure).
    StepFailed {
        step_index: usize,
        step_id: String,
        error: String,
    },
    /// Todos los steps terminaron correctamente.
    ProvisioningCompleted { definition_hash: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionEvent {
    pub seq: u64, // asignado por el EventStore (orden append)
    pub run_id: Uuid,
    pub kind: ProvisionEventKind,
    pub ts: DateTime<Utc>,
}
