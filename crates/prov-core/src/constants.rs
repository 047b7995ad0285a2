//! Constantes del orquestador.
//!
//! `ENGINE_VERSION` participa en el cálculo del `definition_hash` de cada
//! `Provisioner`: un cambio de versión invalida cualquier intento futuro de
//! reanudar un aprovisionamiento registrado con una versión anterior.

/// Versión lógica del contrato de steps. Mantener estable mientras no haya
/// cambios incompatibles en la semántica de ejecución.
pub const ENGINE_VERSION: &str = "P1.0";
