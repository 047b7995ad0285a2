//! Errores de los steps del módulo.

use prov_azure::{DeploymentError, OutputError};
use prov_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostgresqlError {
    #[error("provisioning context field '{0}' has not been populated")]
    MissingContextField(&'static str),
    #[error("invalid database name \"{0}\"")]
    InvalidDatabaseName(String),
    #[error("error deploying ARM template: {0}")]
    Deployment(#[source] DeploymentError),
    #[error("error retrieving fully qualified domain name from deployment: {0}")]
    DeploymentOutput(#[source] OutputError),
    #[error("error connecting to database server: {0}")]
    Connect(#[source] PersistenceError),
    #[error("error creating role \"{role}\": {source}")]
    CreateRole {
        role: String,
        #[source]
        source: PersistenceError,
    },
    #[error("error adding role \"{role}\" to role \"{admin}\": {source}")]
    GrantRole {
        role: String,
        admin: String,
        #[source]
        source: PersistenceError,
    },
    #[error("error transferring ownership of database \"{database}\": {source}")]
    TransferOwnership {
        database: String,
        #[source]
        source: PersistenceError,
    },
    #[error("database transaction error: {0}")]
    Transaction(#[from] PersistenceError),
}
