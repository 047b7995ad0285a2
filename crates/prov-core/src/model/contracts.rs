//! Marcadores de forma para los tipos que define cada módulo de servicio.
//!
//! El orquestador no conoce el contenido de estos tipos; sólo exige las
//! capacidades mínimas (serialización, `Debug`, envío entre hilos). Los pares
//! normal/seguro son siempre dos tipos distintos: cualquier campo con una
//! credencial o secreto vive únicamente en la variante `Secure*`, que no se
//! expone a llamadores generales ni se persiste en vistas en claro. Por eso
//! las variantes seguras no exigen `Debug`.

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Parámetros no sensibles de una petición de aprovisionamiento.
pub trait ProvisioningParameters: Serialize + DeserializeOwned + Debug + Send + Sync {}

/// Parámetros sensibles de una petición de aprovisionamiento.
pub trait SecureProvisioningParameters: Serialize + DeserializeOwned + Send + Sync {}

/// Detalles no sensibles de una instancia aprovisionada.
pub trait InstanceDetails: Serialize + DeserializeOwned + Debug + Send + Sync {}

/// Detalles sensibles de una instancia aprovisionada.
pub trait SecureInstanceDetails: Serialize + DeserializeOwned + Send + Sync {}

/// Credenciales de conexión entregadas al llamador.
pub trait Credentials: Serialize + Send + Sync {}

/// Registro mutable que se encadena a través de los steps de un módulo.
///
/// Invariante: un atributo está vacío (aún no producido) o fijo; ningún step
/// puede deshacer lo que fijó un step anterior. `check_progress` permite al
/// módulo expresar esa regla y el orquestador la verifica tras cada step.
pub trait ProvisioningContext: Debug + Send + Sync {
    /// Devuelve `Err(detalle)` si `self` deshace o altera algo ya fijado en
    /// `previous`.
    fn check_progress(&self, previous: &Self) -> Result<(), String> {
        let _ = previous;
        Ok(())
    }
}

/// Estabilidad relativa de un módulo de servicio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stability {
    /// Módulo inmaduro; ni siquiera es seguro que sea lo correcto.
    Experimental,
    /// Módulo que se aproxima a un estado estable.
    Preview,
    /// Módulo maduro, listo para producción.
    Stable,
}
