//! Plantilla de infraestructura embebida.
//!
//! Parámetros que espera (ver `steps::deploy::deployment_parameters`):
//! `administratorLogin`, `administratorLoginPassword`, `serverName`,
//! `databaseName`, `skuName`, `skuTier`, `skuCapacity`, `storageMB`.

pub static ARM_TEMPLATE: &[u8] = include_bytes!("../templates/arm_template.json");

/// Salida con el FQDN del servidor desplegado.
pub const OUTPUT_FQDN: &str = "fullyQualifiedDomainName";
