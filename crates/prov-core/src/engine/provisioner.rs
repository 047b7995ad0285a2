use std::collections::HashSet;
use std::fmt;

use serde_json::json;
use uuid::Uuid;

use crate::engine::{ProvisionerBuilder, ProvisioningRun};
use crate::errors::CoreEngineError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::model::{ProvisioningContext, ProvisioningParameters};
use crate::step::ProvisioningStep;

/// Secuencia ordenada de steps para una combinación módulo/plan.
///
/// No guarda estado entre invocaciones: cada `start` crea una
/// `ProvisioningRun` independiente con su propio contexto, por lo que un
/// mismo `Provisioner` puede compartirse entre peticiones concurrentes.
pub struct Provisioner<C, P> {
    steps: Vec<Box<dyn ProvisioningStep<C, P>>>,
    definition_hash: String,
}

impl<C, P> Provisioner<C, P>
    where C: ProvisioningContext,
          P: ProvisioningParameters
{
    /// Construye el provisioner. Falla si la lista está vacía o si dos steps
    /// comparten nombre.
    pub fn new(steps: Vec<Box<dyn ProvisioningStep<C, P>>>) -> Result<Self, CoreEngineError> {
        if steps.is_empty() {
            return Err(CoreEngineError::EmptyProvisioner);
        }
        let mut seen = HashSet::with_capacity(steps.len());
        for s in &steps {
            if !seen.insert(s.id()) {
                return Err(CoreEngineError::DuplicateStepId(s.id().to_string()));
            }
        }
        let definition_hash = definition_hash_for(steps.iter().map(|s| s.id()));
        Ok(Self { steps, definition_hash })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Siempre `false`: la construcción rechaza listas vacías.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Nombres de los steps, en orden de ejecución.
    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id()).collect()
    }

    /// Hash de la secuencia de nombres (más `ENGINE_VERSION`).
    pub fn definition_hash(&self) -> &str {
        &self.definition_hash
    }

    pub(crate) fn step_at(&self, index: usize) -> Option<&dyn ProvisioningStep<C, P>> {
        self.steps.get(index).map(|s| s.as_ref())
    }

    /// Inicia una ejecución con eventos en memoria.
    pub fn start<'a>(&'a self, context: C, params: &'a P) -> ProvisioningRun<'a, C, P, InMemoryEventStore> {
        self.start_with_store(context, params, InMemoryEventStore::default())
    }

    /// Inicia una ejecución registrando eventos en `event_store`.
    pub fn start_with_store<'a, E: EventStore>(&'a self,
                                               context: C,
                                               params: &'a P,
                                               event_store: E)
                                               -> ProvisioningRun<'a, C, P, E> {
        ProvisioningRun::new(self, Uuid::new_v4(), context, params, event_store)
    }

    /// Ejecuta todos los steps y devuelve el contexto terminal.
    pub fn run(&self, context: C, params: &P) -> Result<C, CoreEngineError> {
        self.start(context, params).run_to_completion()
    }
}

impl<C, P> Provisioner<C, P>
    where C: ProvisioningContext + 'static,
          P: ProvisioningParameters + 'static
{
    #[inline]
    pub fn builder() -> ProvisionerBuilder<C, P> {
        ProvisionerBuilder::new()
    }
}

impl<C, P> fmt::Debug for Provisioner<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provisioner")
         .field("steps", &self.steps.iter().map(|s| s.id()).collect::<Vec<_>>())
         .field("definition_hash", &self.definition_hash)
         .finish()
    }
}

fn definition_hash_for<'s>(ids: impl Iterator<Item = &'s str>) -> String {
    let ids: Vec<&str> = ids.collect();
    hash_value(&json!({
                   "engine_version": crate::constants::ENGINE_VERSION,
                   "steps": ids,
               }))
}
