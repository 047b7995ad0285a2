pub mod snapshot;

pub use snapshot::{RunSnapshot, StepSlot};
