//! El módulo PostgreSQL frente al contrato `ServiceModule`.

use std::sync::Arc;

use prov_azure::{is_valid_location, ArmDeployer};
use prov_core::{CoreEngineError, Provisioner, ServiceModule, Stability, ValidationError};
use prov_persistence::SessionProvider;

use crate::plans::{find_plan, SERVICE_ID};
use crate::settings::PostgresqlSettings;
use crate::steps::{DeployArmTemplateStep, PreProvisionStep, SetupDatabaseStep};
use crate::types::{PostgresqlCredentials, PostgresqlInstanceDetails, PostgresqlProvisioningContext,
                   PostgresqlProvisioningParameters, PostgresqlSecureInstanceDetails,
                   PostgresqlSecureProvisioningParameters};

pub const MODULE_NAME: &str = "postgresql";

/// Módulo de servicio. `D` es el desplegador de plantillas y `S` el
/// proveedor de sesiones SQL; ambos se comparten entre peticiones.
pub struct PostgresqlModule<D, S> {
    deployer: Arc<D>,
    sessions: Arc<S>,
    settings: PostgresqlSettings,
}

impl<D, S> PostgresqlModule<D, S>
    where D: ArmDeployer + 'static,
          S: SessionProvider + 'static
{
    pub fn new(deployer: Arc<D>, sessions: Arc<S>, settings: PostgresqlSettings) -> Self {
        Self { deployer,
               sessions,
               settings }
    }

    pub fn settings(&self) -> &PostgresqlSettings {
        &self.settings
    }
}

impl<D, S> ServiceModule for PostgresqlModule<D, S>
    where D: ArmDeployer + 'static,
          S: SessionProvider + 'static
{
    type ProvisioningParameters = PostgresqlProvisioningParameters;
    type SecureProvisioningParameters = PostgresqlSecureProvisioningParameters;
    type ProvisioningContext = PostgresqlProvisioningContext;
    type InstanceDetails = PostgresqlInstanceDetails;
    type SecureInstanceDetails = PostgresqlSecureInstanceDetails;
    type Credentials = PostgresqlCredentials;

    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn stability(&self) -> Stability {
        Stability::Preview
    }

    fn validate_provisioning_parameters(&self, params: &PostgresqlProvisioningParameters) -> Result<(), ValidationError> {
        if !is_valid_location(&params.location) {
            return Err(ValidationError::new("location", format!("invalid location: \"{}\"", params.location)));
        }
        Ok(())
    }

    fn get_provisioner(&self,
                       service_id: &str,
                       plan_id: &str)
                       -> Result<Provisioner<PostgresqlProvisioningContext, PostgresqlProvisioningParameters>,
                                 CoreEngineError> {
        if service_id != SERVICE_ID {
            return Err(CoreEngineError::UnknownService(service_id.to_string()));
        }
        let plan = find_plan(service_id, plan_id).ok_or_else(|| CoreEngineError::UnknownPlan {
                                                     service_id: service_id.to_string(),
                                                     plan_id: plan_id.to_string(),
                                                 })?;
        Provisioner::builder().step(PreProvisionStep)
                              .step(DeployArmTemplateStep::new(Arc::clone(&self.deployer),
                                                               plan,
                                                               self.settings.administrator_login.clone()))
                              .step(SetupDatabaseStep::new(Arc::clone(&self.sessions), self.settings.clone()))
                              .build()
    }

    fn new_provisioning_context(&self) -> PostgresqlProvisioningContext {
        PostgresqlProvisioningContext::default()
    }

    fn instance_details(&self,
                        context: &PostgresqlProvisioningContext)
                        -> (PostgresqlInstanceDetails, PostgresqlSecureInstanceDetails) {
        (context.details(), context.secure_details())
    }

    fn credentials(&self,
                   details: &PostgresqlInstanceDetails,
                   secure: &PostgresqlSecureInstanceDetails)
                   -> PostgresqlCredentials {
        PostgresqlCredentials { host: details.fully_qualified_domain_name.clone(),
                                port: self.settings.connection.port,
                                database: details.database_name.clone(),
                                username: self.settings.connection_user(&details.server_name),
                                password: secure.administrator_login_password.clone() }
    }
}
