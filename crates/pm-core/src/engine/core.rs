//! Core HistoryEngine implementation

use log::debug;
use serde_json::{Map, Value};

use crate::active::resolve_instance_active_ids;
use crate::config::EngineConfig;
use crate::engine::{EngineBuilder, InstanceCtx};
use crate::errors::HistoryError;
use crate::highlight::{highlighted_transition_ids, reconstruct_flows};
use crate::model::{HistoricActivityInstanceFlow, HistoricActivityRecord, ProcessInstanceItem};
use crate::provider::EngineProvider;
use crate::tree::{build_instance_tree, top_instance_id, TreeMode};

/// Punto de entrada de la reconstrucción de historial.
///
/// Envuelve un `EngineProvider` y la configuración de techos de recursión.
/// Cada operación es una función pura de lo que devuelven las stores para la
/// instancia pedida: no hay estado mutable compartido entre llamadas, así que
/// el engine se puede compartir entre hilos si el provider lo permite.
#[derive(Debug, Clone)]
pub struct HistoryEngine<P>
    where P: EngineProvider
{
    provider: P,
    config: EngineConfig,
}

impl<P> HistoryEngine<P> where P: EngineProvider
{
    /// Crea un nuevo builder para configurar el engine
    #[inline]
    pub fn builder(provider: P) -> EngineBuilder<P> {
        EngineBuilder::new(provider)
    }

    /// Engine con la configuración por defecto.
    #[inline]
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, EngineConfig::default())
    }

    pub fn with_config(provider: P, config: EngineConfig) -> Self {
        Self { provider, config }
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Carga el snapshot de una instancia (metadatos, grafo y log).
    pub fn load(&self, instance_id: &str) -> Result<InstanceCtx, HistoryError> {
        InstanceCtx::load(&self.provider, instance_id)
    }

    /// Log histórico normalizado (con los registros sintéticos insertados).
    pub fn historic_activity_records(&self, instance_id: &str) -> Result<Vec<HistoricActivityRecord>, HistoryError> {
        let ctx = self.load(instance_id)?;
        let index = ctx.index(self.config.max_subprocess_depth)?;
        ctx.normalized(&index, self.config.max_subprocess_depth)
    }

    /// Un flujo por registro normalizado, en orden de log.
    pub fn activity_flows(&self, instance_id: &str) -> Result<Vec<HistoricActivityInstanceFlow>, HistoryError> {
        let ctx = self.load(instance_id)?;
        let index = ctx.index(self.config.max_subprocess_depth)?;
        let records = ctx.normalized(&index, self.config.max_subprocess_depth)?;
        let flows = reconstruct_flows(&records, &index);
        debug!("instance '{}': {} flows reconstructed", instance_id, flows.len());
        Ok(flows)
    }

    /// Ids de las transiciones recorridas, para resaltar en el diagrama.
    pub fn highlighted_flows(&self, instance_id: &str) -> Result<Vec<String>, HistoryError> {
        let flows = self.activity_flows(instance_id)?;
        Ok(highlighted_transition_ids(&flows))
    }

    /// Conjunto activo corregido. Vacío si la instancia ya terminó.
    pub fn active_activity_ids(&self, instance_id: &str) -> Result<Vec<String>, HistoryError> {
        let ctx = self.load(instance_id)?;
        let index = ctx.index(self.config.max_subprocess_depth)?;
        let active = resolve_instance_active_ids(&ctx.meta, &ctx.engine_active_ids, &ctx.log, &index);
        debug!("instance '{}': engine reported {} active, resolved {}",
               instance_id,
               ctx.engine_active_ids.len(),
               active.len());
        Ok(active)
    }

    /// Árbol super/sub a partir de `instance_id`.
    pub fn instance_tree(&self, instance_id: &str, mode: TreeMode) -> Result<Vec<ProcessInstanceItem>, HistoryError> {
        build_instance_tree(&self.provider, instance_id, mode, self.config.max_instance_depth)
    }

    /// Instancia raíz de la cadena de super-instancias.
    pub fn top_instance_id(&self, instance_id: &str) -> Result<String, HistoryError> {
        top_instance_id(&self.provider, instance_id, self.config.max_instance_depth)
    }

    pub fn instance_variables(&self, instance_id: &str) -> Result<Map<String, Value>, HistoryError> {
        self.provider
            .instance(instance_id)
            .map(|meta| meta.variables)
            .ok_or_else(|| HistoryError::InstanceNotFound(instance_id.to_string()))
    }

    /// Variables de la instancia raíz: las variables de proceso se guardan
    /// contra la raíz, no contra las sub-instancias.
    pub fn top_instance_variables(&self, instance_id: &str) -> Result<Map<String, Value>, HistoryError> {
        let top = self.top_instance_id(instance_id)?;
        self.instance_variables(&top)
    }
}
