//! Configuración del motor desde variables de entorno.
//! Usa `PM_MAX_SUBPROCESS_DEPTH` y `PM_MAX_INSTANCE_DEPTH`; ambos opcionales.

use std::env;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use crate::constants::{DEFAULT_MAX_INSTANCE_DEPTH, DEFAULT_MAX_SUBPROCESS_DEPTH};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Techos defensivos usados por los recorridos recursivos del motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Scopes anidados máximos al indexar el grafo y al expandir subprocesos.
    pub max_subprocess_depth: usize,
    /// Niveles máximos del árbol de instancias y del ascenso hacia la raíz.
    pub max_instance_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { max_subprocess_depth: DEFAULT_MAX_SUBPROCESS_DEPTH,
               max_instance_depth: DEFAULT_MAX_INSTANCE_DEPTH }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let max_subprocess_depth = parse_var("PM_MAX_SUBPROCESS_DEPTH").unwrap_or(defaults.max_subprocess_depth);
        let max_instance_depth = parse_var("PM_MAX_INSTANCE_DEPTH").unwrap_or(defaults.max_instance_depth);
        Self { max_subprocess_depth,
               max_instance_depth }
    }

    pub fn with_max_subprocess_depth(mut self, depth: usize) -> Self {
        self.max_subprocess_depth = depth;
        self
    }

    pub fn with_max_instance_depth(mut self, depth: usize) -> Self {
        self.max_instance_depth = depth;
        self
    }
}

fn parse_var(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).filter(|v| *v > 0)
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
