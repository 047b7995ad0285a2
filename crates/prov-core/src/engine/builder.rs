//! Builder para `Provisioner`.
//!
//! ```ignore
//! let provisioner = Provisioner::builder()
//!     .step(PreProvisionStep)
//!     .step(DeployStep::new(deployer))
//!     .step_fn("audit", |ctx, _p| Ok(ctx.clone()))
//!     .build()?;
//! ```

use crate::engine::Provisioner;
use crate::errors::{CoreEngineError, StepError};
use crate::model::{ProvisioningContext, ProvisioningParameters};
use crate::step::{FnStep, ProvisioningStep};

/// Acumula steps en orden; `build` aplica las validaciones de
/// `Provisioner::new`.
pub struct ProvisionerBuilder<C, P> {
    steps: Vec<Box<dyn ProvisioningStep<C, P>>>,
}

impl<C, P> Default for ProvisionerBuilder<C, P> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<C, P> ProvisionerBuilder<C, P>
    where C: ProvisioningContext + 'static,
          P: ProvisioningParameters + 'static
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Añade el siguiente step de la secuencia.
    #[inline]
    pub fn step<S>(mut self, step: S) -> Self
        where S: ProvisioningStep<C, P> + 'static
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Añade un step declarado con una closure.
    #[inline]
    pub fn step_fn<F>(self, id: impl Into<String>, f: F) -> Self
        where F: Fn(&C, &P) -> Result<C, StepError> + Send + Sync + 'static
    {
        self.step(FnStep::new(id, f))
    }

    #[inline]
    pub fn build(self) -> Result<Provisioner<C, P>, CoreEngineError> {
        Provisioner::new(self.steps)
    }
}
