//! prov-azure: piezas de la plataforma destino que los módulos de servicio
//! consumen.
//!
//! - `location`: regiones soportadas por el desplegador.
//! - `deployer`: contrato del desplegador de plantillas (colaborador externo).
//! - `generate`: nombres de recursos, identificadores y contraseñas.

pub mod deployer;
pub mod generate;
pub mod location;

pub use deployer::{output_string, ArmDeployer, DeploymentError, DeploymentOutputs, DeploymentParameters, OutputError};
pub use location::{is_valid_location, SUPPORTED_LOCATIONS};
