//! prov-core: orquestador lineal de aprovisionamiento.
//!
//! - `engine`: `Provisioner` (secuencia ordenada de steps) y `ProvisioningRun`
//!   (ejecución paso a paso, stop-on-failure).
//! - `step`: contrato `ProvisioningStep` y adaptadores.
//! - `event` / `repo`: log append-only de cada ejecución y su replay.
//! - `model`: contratos de tipos por módulo (normal / seguro).
//! - `module`: contrato `ServiceModule`.

pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod module;
pub mod repo;
pub mod step;

pub use engine::{Provisioner, ProvisionerBuilder, ProvisioningRun, RunStatus};
pub use errors::{ContractError, CoreEngineError, StepError, ValidationError};
pub use event::{EventStore, InMemoryEventStore, ProvisionEvent, ProvisionEventKind};
pub use model::{Credentials, InstanceDetails, ProvisioningContext, ProvisioningParameters, SecureInstanceDetails,
                SecureProvisioningParameters, Stability};
pub use module::{decode_object, provision, ProvisionRequestError, ServiceModule};
pub use repo::{RunSnapshot, StepSlot};
pub use step::{step_fn, FnStep, ProvisioningStep, StepStatus};
