//! Builder para `HistoryEngine`.

use crate::config::EngineConfig;
use crate::engine::HistoryEngine;
use crate::provider::EngineProvider;

/// Acumula provider y configuración antes de crear el engine.
#[derive(Debug)]
pub struct EngineBuilder<P: EngineProvider> {
    provider: P,
    config: EngineConfig,
}

impl<P: EngineProvider> EngineBuilder<P> {
    #[inline]
    pub(crate) fn new(provider: P) -> Self {
        Self { provider,
               config: EngineConfig::default() }
    }

    /// Reemplaza la configuración completa.
    #[inline]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Configuración leída de variables de entorno (y `.env`).
    #[inline]
    pub fn config_from_env(self) -> Self {
        self.config(EngineConfig::from_env())
    }

    #[inline]
    pub fn max_subprocess_depth(mut self, depth: usize) -> Self {
        self.config.max_subprocess_depth = depth;
        self
    }

    #[inline]
    pub fn max_instance_depth(mut self, depth: usize) -> Self {
        self.config.max_instance_depth = depth;
        self
    }

    pub fn build(self) -> HistoryEngine<P> {
        HistoryEngine::with_config(self.provider, self.config)
    }
}
