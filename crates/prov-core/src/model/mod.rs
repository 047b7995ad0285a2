//! Contratos de tipos compartidos por orquestador y módulos de servicio.

pub mod contracts;

pub use contracts::{Credentials, InstanceDetails, ProvisioningContext, ProvisioningParameters, SecureInstanceDetails,
                    SecureProvisioningParameters, Stability};
