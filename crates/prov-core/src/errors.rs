//! Errores del orquestador y de los contratos de módulo.
//!
//! - `CoreEngineError`: construcción de un `Provisioner` y ejecución de steps.
//!   El error de un step se reenvía intacto dentro de `StepFailed`, anotado
//!   con el nombre del step que falló.
//! - `ContractError`: un payload opaco no pudo interpretarse como el tipo
//!   concreto que el módulo espera (error de cableado, nunca se reintenta).
//! - `ValidationError`: rechazo de la petición atribuido a un campo.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error devuelto por un step. El orquestador no lo interpreta.
pub type StepError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum CoreEngineError {
    #[error("provisioner must declare at least one step")]
    EmptyProvisioner,
    #[error("duplicate step id: {0}")]
    DuplicateStepId(String),
    #[error("provisioning already completed")]
    ProvisioningCompleted,
    #[error("provisioning has failed previously (stop-on-failure invariant)")]
    ProvisioningHasFailed,
    #[error("step '{step_id}' failed: {source}")]
    StepFailed {
        step_index: usize,
        step_id: String,
        #[source]
        source: StepError,
    },
    #[error("step '{step_id}' regressed the provisioning context: {detail}")]
    ContextRegression { step_id: String, detail: String },
    #[error("unknown service id: {0}")]
    UnknownService(String),
    #[error("unknown plan id '{plan_id}' for service '{service_id}'")]
    UnknownPlan { service_id: String, plan_id: String },
}

impl CoreEngineError {
    /// Nombre del step responsable, si el error proviene de uno.
    pub fn step_id(&self) -> Option<&str> {
        match self {
            Self::StepFailed { step_id, .. } | Self::ContextRegression { step_id, .. } => Some(step_id),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("error decoding {expected}: {reason}")]
pub struct ContractError {
    pub expected: &'static str,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("validation error on field '{field}': {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(),
               message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failed_exposes_step_id_and_source() {
        let err = CoreEngineError::StepFailed { step_index: 1,
                                                step_id: "deploy".into(),
                                                source: "boom".into() };
        assert_eq!(err.step_id(), Some("deploy"));
        assert_eq!(err.to_string(), "step 'deploy' failed: boom");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_error_names_field() {
        let err = ValidationError::new("location", "invalid location: \"mars\"");
        assert_eq!(err.field, "location");
        assert_eq!(err.to_string(), "validation error on field 'location': invalid location: \"mars\"");
    }
}
