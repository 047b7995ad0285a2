use log::debug;
use prov_azure::generate::{new_identifier, new_password, new_resource_name};
use prov_core::{ProvisioningStep, StepError};

use super::PRE_PROVISION;
use crate::types::{PostgresqlProvisioningContext, PostgresqlProvisioningParameters};

/// Genera nombres y secretos sin IO. Sólo rellena los campos vacíos, así que
/// repetirlo sobre un contexto ya poblado no cambia nada.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreProvisionStep;

impl PreProvisionStep {
    pub fn populate(context: &PostgresqlProvisioningContext) -> PostgresqlProvisioningContext {
        let mut next = context.clone();
        fill(&mut next.resource_group_name, new_resource_name);
        fill(&mut next.arm_deployment_name, new_resource_name);
        fill(&mut next.server_name, new_resource_name);
        fill(&mut next.administrator_login_password, new_password);
        fill(&mut next.database_name, new_identifier);
        next
    }
}

fn fill(slot: &mut String, generate: fn() -> String) {
    if slot.is_empty() {
        *slot = generate();
    }
}

impl ProvisioningStep<PostgresqlProvisioningContext, PostgresqlProvisioningParameters> for PreProvisionStep {
    fn id(&self) -> &str {
        PRE_PROVISION
    }

    fn run(&self,
           context: &PostgresqlProvisioningContext,
           _params: &PostgresqlProvisioningParameters)
           -> Result<PostgresqlProvisioningContext, StepError> {
        let next = Self::populate(context);
        debug!("preProvision: resource_group={} server={} database={}",
               next.resource_group_name,
               next.server_name,
               next.database_name);
        Ok(next)
    }
}
