//! Eventos emitidos por cada ejecución de un `Provisioner`.

mod store;
mod types;

pub use store::{EventStore, InMemoryEventStore};
pub use types::{ProvisionEvent, ProvisionEventKind};
