//! Orquestador de aprovisionamiento.
//!
//! Ejecuta una lista ordenada de steps nombrados, uno a la vez, pasando a
//! cada uno el contexto actual y los parámetros originales. Se detiene en el
//! primer fallo, sin reintentos ni rollback propio.

pub mod builder;
pub mod provisioner;
pub mod run;

pub use builder::ProvisionerBuilder;
pub use provisioner::Provisioner;
pub use run::{ProvisioningRun, RunStatus};
