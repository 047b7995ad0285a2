//! Definiciones relacionadas a Steps.
//!
//! Un step es una unidad nombrada de trabajo `(contexto, parámetros) ->
//! contexto actualizado | error`. Este módulo define:
//! - `ProvisioningStep`: interfaz usada por el orquestador.
//! - `FnStep`: adaptador para declarar un step a partir de una closure.
//! - `StepStatus`: estado de un step reconstruido desde eventos.

pub mod definition;
pub mod fn_step;
mod status;

pub use definition::ProvisioningStep;
pub use fn_step::{step_fn, FnStep};
pub use status::StepStatus;
