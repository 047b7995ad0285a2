//! Contrato que cada módulo de servicio expone hacia arriba.
//!
//! Un módulo fija sus tipos concretos (parámetros, contexto, detalles,
//! credenciales) como tipos asociados, de modo que el orquestador queda
//! parametrizado por ellos y no hace falta ningún casting en tiempo de
//! ejecución. Los únicos puntos donde llega un valor opaco son
//! `decode_provisioning_parameters` y `decode_secure_provisioning_parameters`,
//! que convierten un objeto JSON a la forma concreta o fallan con
//! `ContractError`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::engine::Provisioner;
use crate::errors::{ContractError, CoreEngineError, ValidationError};
use crate::model::{Credentials, InstanceDetails, ProvisioningContext, ProvisioningParameters, SecureInstanceDetails,
                   SecureProvisioningParameters, Stability};

pub trait ServiceModule: Send + Sync {
    type ProvisioningParameters: ProvisioningParameters;
    type SecureProvisioningParameters: SecureProvisioningParameters;
    type ProvisioningContext: ProvisioningContext;
    type InstanceDetails: InstanceDetails;
    type SecureInstanceDetails: SecureInstanceDetails;
    type Credentials: Credentials;

    fn name(&self) -> &str;

    fn stability(&self) -> Stability;

    /// Interpreta un payload opaco como los parámetros concretos del módulo.
    fn decode_provisioning_parameters(&self, raw: Value) -> Result<Self::ProvisioningParameters, ContractError> {
        decode_object(raw)
    }

    /// Igual que `decode_provisioning_parameters` para la parte sensible.
    fn decode_secure_provisioning_parameters(&self,
                                             raw: Value)
                                             -> Result<Self::SecureProvisioningParameters, ContractError> {
        decode_object(raw)
    }

    /// Valida los parámetros antes de invocar al orquestador. Sin efectos.
    fn validate_provisioning_parameters(&self, params: &Self::ProvisioningParameters) -> Result<(), ValidationError>;

    /// Provisioner con los steps ordenados del módulo para el servicio/plan.
    fn get_provisioner(&self,
                       service_id: &str,
                       plan_id: &str)
                       -> Result<Provisioner<Self::ProvisioningContext, Self::ProvisioningParameters>, CoreEngineError>;

    /// Contexto vacío con el que arranca el primer step.
    fn new_provisioning_context(&self) -> Self::ProvisioningContext;

    /// Separa el contexto terminal en su vista no sensible y su vista segura.
    fn instance_details(&self,
                        context: &Self::ProvisioningContext)
                        -> (Self::InstanceDetails, Self::SecureInstanceDetails);

    /// Compone las credenciales de conexión a partir de ambas vistas.
    fn credentials(&self, details: &Self::InstanceDetails, secure: &Self::SecureInstanceDetails) -> Self::Credentials;
}

/// Sólo se aceptan objetos JSON: serde admitiría también un array
/// posicional.
pub fn decode_object<T: DeserializeOwned>(raw: Value) -> Result<T, ContractError> {
    let expected = std::any::type_name::<T>();
    match raw {
        Value::Object(_) => serde_json::from_value(raw).map_err(|e| ContractError { expected,
                                                                                    reason: e.to_string() }),
        other => Err(ContractError { expected,
                                     reason: format!("expected a JSON object, found {}", json_kind(&other)) }),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Debug, Error)]
pub enum ProvisionRequestError {
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Engine(#[from] CoreEngineError),
}

/// Recorrido completo de una petición: decodifica, valida, obtiene el
/// provisioner y lo ejecuta sobre un contexto vacío.
pub fn provision<M: ServiceModule>(module: &M,
                                   service_id: &str,
                                   plan_id: &str,
                                   raw_params: Value)
                                   -> Result<M::ProvisioningContext, ProvisionRequestError> {
    let params = module.decode_provisioning_parameters(raw_params)?;
    module.validate_provisioning_parameters(&params)?;
    let provisioner = module.get_provisioner(service_id, plan_id)?;
    let context = provisioner.run(module.new_provisioning_context(), &params)?;
    Ok(context)
}
