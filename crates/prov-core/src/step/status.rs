/// Estado de un step en una ejecución.
///
/// Las transiciones válidas son:
/// - `Pending` -> `Running`
/// - `Running` -> `Finished`
/// - `Running` -> `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// El paso está pendiente de ejecución.
    Pending,
    /// El paso comenzó y no ha reportado resultado.
    Running,
    /// El paso finalizó correctamente.
    Finished,
    /// El paso falló.
    Failed,
}
