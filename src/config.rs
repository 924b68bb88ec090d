//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use std::env;

use once_cell::sync::Lazy;
use pm_core::{EngineConfig, HistoryEngine, InMemoryEngineProvider};

use crate::errors::AppError;

/// Configuración global de la aplicación.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ruta por defecto del snapshot JSON de las stores (`PM_SNAPSHOT`).
    pub snapshot_path: Option<String>,
    /// Techos de recursión del motor.
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        pm_core::config::init_dotenv();
        Self { snapshot_path: env::var("PM_SNAPSHOT").ok().filter(|p| !p.trim().is_empty()),
               engine: EngineConfig::from_env() }
    }

    /// Engine sobre `snapshot_path` con los techos de esta configuración.
    pub fn open_snapshot(&self) -> Result<HistoryEngine<InMemoryEngineProvider>, AppError> {
        let path = self.snapshot_path
                       .as_deref()
                       .ok_or_else(|| AppError::Config("PM_SNAPSHOT not set".into()))?;
        crate::open_snapshot_with(path, self.engine)
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
