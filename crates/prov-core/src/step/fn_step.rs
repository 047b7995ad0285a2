use std::fmt;

use super::ProvisioningStep;
use crate::errors::StepError;

/// Step respaldado por una closure `(contexto, parámetros) -> Result`.
pub struct FnStep<F> {
    id: String,
    f: F,
}

impl<F> FnStep<F> {
    pub fn new(id: impl Into<String>, f: F) -> Self {
        Self { id: id.into(), f }
    }
}

impl<F> fmt::Debug for FnStep<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnStep").field("id", &self.id).finish_non_exhaustive()
    }
}

impl<C, P, F> ProvisioningStep<C, P> for FnStep<F> where F: Fn(&C, &P) -> Result<C, StepError> + Send + Sync
{
    fn id(&self) -> &str {
        &self.id
    }

    fn run(&self, context: &C, params: &P) -> Result<C, StepError> {
        (self.f)(context, params)
    }
}

/// Atajo para construir un step en caja a partir de un nombre y una función.
pub fn step_fn<C, P, F>(id: impl Into<String>, f: F) -> Box<dyn ProvisioningStep<C, P>>
    where F: Fn(&C, &P) -> Result<C, StepError> + Send + Sync + 'static,
          C: 'static,
          P: 'static
{
    Box::new(FnStep::new(id, f))
}
