//! procmon-rust
//!
//! Fachada sobre `pm-core`, el motor de reconstrucción de historial de
//! instancias de proceso:
//! - Re-exporta el motor, el modelo y el provider en memoria.
//! - Expone `config` (entorno) y `errors` para la capa de aplicación.
//! - `open_snapshot` crea un engine a partir de un snapshot JSON en disco;
//!   `AppConfig::open_snapshot` usa la ruta de `PM_SNAPSHOT`.

pub mod config;
pub mod errors;

use std::path::Path;

pub use pm_core::*;

use crate::errors::AppError;

/// Engine sobre el snapshot en `path`, con los techos de `CONFIG`.
pub fn open_snapshot(path: impl AsRef<Path>) -> Result<HistoryEngine<InMemoryEngineProvider>, AppError> {
    open_snapshot_with(path, config::CONFIG.engine)
}

/// Engine sobre el snapshot en `path` con techos explícitos.
pub fn open_snapshot_with(path: impl AsRef<Path>,
                          engine: EngineConfig)
                          -> Result<HistoryEngine<InMemoryEngineProvider>, AppError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let provider = InMemoryEngineProvider::from_json_str(&raw)?;
    log::debug!("snapshot loaded from {}", path.as_ref().display());
    Ok(HistoryEngine::with_config(provider, engine))
}
