//! Tipos concretos del módulo.
//!
//! El contexto no es serializable: sus dos vistas sí lo son
//! (`PostgresqlInstanceDetails` y `PostgresqlSecureInstanceDetails`), de
//! modo que la contraseña sólo viaja en la variante segura.

use std::fmt;

use prov_core::{Credentials, InstanceDetails, ProvisioningContext, ProvisioningParameters, SecureInstanceDetails,
                SecureProvisioningParameters};
use serde::{Deserialize, Serialize};

/// Campos desconocidos se rechazan: un secreto nunca debe colarse en la
/// variante no sensible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostgresqlProvisioningParameters {
    pub location: String,
}

impl ProvisioningParameters for PostgresqlProvisioningParameters {}

/// El módulo no recibe parámetros sensibles: todos los secretos se generan
/// en `preProvision`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostgresqlSecureProvisioningParameters {}

impl SecureProvisioningParameters for PostgresqlSecureProvisioningParameters {}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct PostgresqlProvisioningContext {
    pub resource_group_name: String,
    pub arm_deployment_name: String,
    pub server_name: String,
    pub administrator_login_password: String,
    pub database_name: String,
    pub fully_qualified_domain_name: String,
}

impl PostgresqlProvisioningContext {
    /// Reconstruye el contexto a partir de sus dos vistas.
    pub fn from_details(details: &PostgresqlInstanceDetails, secure: &PostgresqlSecureInstanceDetails) -> Self {
        Self { resource_group_name: details.resource_group_name.clone(),
               arm_deployment_name: details.arm_deployment_name.clone(),
               server_name: details.server_name.clone(),
               administrator_login_password: secure.administrator_login_password.clone(),
               database_name: details.database_name.clone(),
               fully_qualified_domain_name: details.fully_qualified_domain_name.clone() }
    }

    /// Vista no sensible.
    pub fn details(&self) -> PostgresqlInstanceDetails {
        PostgresqlInstanceDetails { resource_group_name: self.resource_group_name.clone(),
                                    arm_deployment_name: self.arm_deployment_name.clone(),
                                    server_name: self.server_name.clone(),
                                    database_name: self.database_name.clone(),
                                    fully_qualified_domain_name: self.fully_qualified_domain_name.clone() }
    }

    /// Vista segura.
    pub fn secure_details(&self) -> PostgresqlSecureInstanceDetails {
        PostgresqlSecureInstanceDetails { administrator_login_password: self.administrator_login_password.clone() }
    }

    fn fields(&self) -> [(&'static str, &str); 6] {
        [("resourceGroupName", &self.resource_group_name),
         ("armDeploymentName", &self.arm_deployment_name),
         ("serverName", &self.server_name),
         ("administratorLoginPassword", &self.administrator_login_password),
         ("databaseName", &self.database_name),
         ("fullyQualifiedDomainName", &self.fully_qualified_domain_name)]
    }
}

impl ProvisioningContext for PostgresqlProvisioningContext {
    fn check_progress(&self, previous: &Self) -> Result<(), String> {
        for ((name, now), (_, before)) in self.fields().iter().zip(previous.fields().iter()) {
            if !before.is_empty() && now != before {
                return Err(format!("field '{name}' was changed after being set"));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PostgresqlProvisioningContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.administrator_login_password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("PostgresqlProvisioningContext")
         .field("resource_group_name", &self.resource_group_name)
         .field("arm_deployment_name", &self.arm_deployment_name)
         .field("server_name", &self.server_name)
         .field("administrator_login_password", &password)
         .field("database_name", &self.database_name)
         .field("fully_qualified_domain_name", &self.fully_qualified_domain_name)
         .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresqlInstanceDetails {
    pub resource_group_name: String,
    pub arm_deployment_name: String,
    pub server_name: String,
    pub database_name: String,
    pub fully_qualified_domain_name: String,
}

impl InstanceDetails for PostgresqlInstanceDetails {}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresqlSecureInstanceDetails {
    pub administrator_login_password: String,
}

impl SecureInstanceDetails for PostgresqlSecureInstanceDetails {}

impl fmt::Debug for PostgresqlSecureInstanceDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresqlSecureInstanceDetails")
         .field("administrator_login_password", &"<redacted>")
         .finish()
    }
}

/// Credenciales de conexión devueltas al llamador.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PostgresqlCredentials {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Credentials for PostgresqlCredentials {}

impl fmt::Debug for PostgresqlCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresqlCredentials")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("database", &self.database)
         .field("username", &self.username)
         .field("password", &"<redacted>")
         .finish()
    }
}
