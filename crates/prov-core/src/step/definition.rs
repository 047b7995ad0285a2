use crate::errors::StepError;

/// Trait que define un step de aprovisionamiento.
///
/// `run` recibe el contexto actual por referencia y devuelve el contexto
/// actualizado o un error, nunca ambos. Si el step falla, es responsable de
/// revertir sus propios efectos laterales; el orquestador no hace rollback.
pub trait ProvisioningStep<C, P>: Send + Sync {
    /// Identificador estable y único dentro del `Provisioner`. Se usa en
    /// diagnósticos y queda reservado para reanudar tras un reinicio.
    fn id(&self) -> &str;

    /// Ejecuta el step.
    fn run(&self, context: &C, params: &P) -> Result<C, StepError>;
}
