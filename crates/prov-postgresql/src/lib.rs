//! prov-postgresql: módulo de servicio para servidores PostgreSQL
//! gestionados.
//!
//! Steps, en orden: `preProvision` → `deployARMTemplate` → `setupDatabase`.

pub mod error;
pub mod module;
pub mod plans;
pub mod settings;
pub mod steps;
pub mod template;
pub mod types;

pub use error::PostgresqlError;
pub use module::{PostgresqlModule, MODULE_NAME};
pub use plans::{default_plan, find_plan, ServicePlan, Sku, PLANS, SERVICE_ID};
pub use settings::PostgresqlSettings;
pub use steps::setup_database::SetupStatements;
pub use steps::{DeployArmTemplateStep, PreProvisionStep, SetupDatabaseStep, DEPLOY_ARM_TEMPLATE, PRE_PROVISION,
                SETUP_DATABASE};
pub use types::{PostgresqlCredentials, PostgresqlInstanceDetails, PostgresqlProvisioningContext,
                PostgresqlProvisioningParameters, PostgresqlSecureInstanceDetails,
                PostgresqlSecureProvisioningParameters};
