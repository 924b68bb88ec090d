//! Errores del motor de reconstrucción.
//!
//! Sólo `InstanceNotFound`, `DefinitionNotFound` y `RecursionLimitExceeded`
//! llegan al llamador. `StructuralInconsistency` se construye para registrarse
//! como warning y la reconstrucción continúa. `Snapshot` y `Serialization`
//! cubren la entrada y salida JSON.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum HistoryError {
    #[error("process instance not found: {0}")]
    InstanceNotFound(String),
    #[error("process definition not found: {0}")]
    DefinitionNotFound(String),
    #[error("recursion limit exceeded while walking {scope} (limit {limit})")]
    RecursionLimitExceeded { scope: &'static str, limit: usize },
    #[error("structural inconsistency: {0}")]
    StructuralInconsistency(String),
    #[error("invalid snapshot: {0}")]
    Snapshot(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        HistoryError::Snapshot(e.to_string())
    }
}

impl HistoryError {
    /// `true` para los errores que indican datos ausentes en las stores externas.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HistoryError::InstanceNotFound(_) | HistoryError::DefinitionNotFound(_))
    }
}
