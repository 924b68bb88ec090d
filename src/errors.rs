use pm_core::HistoryError;
use thiserror::Error;

/// Errores de la capa de aplicación (carga de snapshots y configuración).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    History(#[from] HistoryError),
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::History(e) if e.is_not_found())
    }
}
