//! Steps del módulo, en el orden en que los encadena el provisioner.

pub mod deploy;
pub mod pre_provision;
pub mod setup_database;

pub use deploy::DeployArmTemplateStep;
pub use pre_provision::PreProvisionStep;
pub use setup_database::SetupDatabaseStep;

use crate::error::PostgresqlError;

pub const PRE_PROVISION: &str = "preProvision";
pub const DEPLOY_ARM_TEMPLATE: &str = "deployARMTemplate";
pub const SETUP_DATABASE: &str = "setupDatabase";

pub(crate) fn require<'c>(value: &'c str, field: &'static str) -> Result<&'c str, PostgresqlError> {
    if value.is_empty() {
        return Err(PostgresqlError::MissingContextField(field));
    }
    Ok(value)
}
