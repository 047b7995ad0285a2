use std::sync::Arc;

use log::{debug, info};
use prov_azure::{output_string, ArmDeployer, DeploymentParameters};
use prov_core::{ProvisioningStep, StepError};
use serde_json::Value;

use super::{require, DEPLOY_ARM_TEMPLATE};
use crate::error::PostgresqlError;
use crate::plans::ServicePlan;
use crate::template::{ARM_TEMPLATE, OUTPUT_FQDN};
use crate::types::{PostgresqlProvisioningContext, PostgresqlProvisioningParameters};

/// Envía la plantilla al desplegador y registra el FQDN del servidor.
pub struct DeployArmTemplateStep<D> {
    deployer: Arc<D>,
    plan: &'static ServicePlan,
    administrator_login: String,
}

impl<D: ArmDeployer> DeployArmTemplateStep<D> {
    pub fn new(deployer: Arc<D>, plan: &'static ServicePlan, administrator_login: impl Into<String>) -> Self {
        Self { deployer,
               plan,
               administrator_login: administrator_login.into() }
    }

    /// Mapa de parámetros de la plantilla para un contexto dado.
    pub fn deployment_parameters(&self,
                                 context: &PostgresqlProvisioningContext)
                                 -> Result<DeploymentParameters, PostgresqlError> {
        let mut params = DeploymentParameters::new();
        params.insert("administratorLogin".into(), Value::from(self.administrator_login.as_str()));
        params.insert("administratorLoginPassword".into(),
                      Value::from(require(&context.administrator_login_password, "administratorLoginPassword")?));
        params.insert("serverName".into(), Value::from(require(&context.server_name, "serverName")?));
        params.insert("databaseName".into(), Value::from(require(&context.database_name, "databaseName")?));
        params.insert("skuName".into(), Value::from(self.plan.sku.name));
        params.insert("skuTier".into(), Value::from(self.plan.sku.tier));
        params.insert("skuCapacity".into(), Value::from(self.plan.sku.capacity));
        params.insert("storageMB".into(), Value::from(self.plan.storage_mb));
        Ok(params)
    }

    fn deploy(&self,
              context: &PostgresqlProvisioningContext,
              params: &PostgresqlProvisioningParameters)
              -> Result<PostgresqlProvisioningContext, PostgresqlError> {
        let deployment_name = require(&context.arm_deployment_name, "armDeploymentName")?;
        let resource_group = require(&context.resource_group_name, "resourceGroupName")?;
        let parameters = self.deployment_parameters(context)?;

        debug!("deployARMTemplate: deployment={} resource_group={} location={} plan={}",
               deployment_name,
               resource_group,
               params.location,
               self.plan.name);
        let outputs = self.deployer
                          .deploy(deployment_name, resource_group, &params.location, ARM_TEMPLATE, &parameters)
                          .map_err(PostgresqlError::Deployment)?;
        let fqdn = output_string(&outputs, OUTPUT_FQDN).map_err(PostgresqlError::DeploymentOutput)?;
        info!("deployARMTemplate: server {} reachable at {}", context.server_name, fqdn);

        let mut next = context.clone();
        next.fully_qualified_domain_name = fqdn.to_string();
        Ok(next)
    }
}

impl<D: ArmDeployer> ProvisioningStep<PostgresqlProvisioningContext, PostgresqlProvisioningParameters>
    for DeployArmTemplateStep<D>
{
    fn id(&self) -> &str {
        DEPLOY_ARM_TEMPLATE
    }

    fn run(&self,
           context: &PostgresqlProvisioningContext,
           params: &PostgresqlProvisioningParameters)
           -> Result<PostgresqlProvisioningContext, StepError> {
        Ok(self.deploy(context, params)?)
    }
}
