//! Contexto de reconstrucción para una instancia concreta.

use crate::errors::HistoryError;
use crate::history::normalize;
use crate::model::{GraphIndex, HistoricActivityRecord, ProcessGraph, ProcessInstanceMeta};
use crate::provider::EngineProvider;

/// Snapshot de una instancia leído una sola vez de las stores: metadatos,
/// grafo de su definición, log histórico crudo y las actividades que el
/// motor reporta activas.
///
/// Todas las operaciones de una llamada trabajan sobre este snapshot, de
/// modo que una lectura concurrente de las stores no mezcla versiones.
#[derive(Debug, Clone)]
pub struct InstanceCtx {
    pub meta: ProcessInstanceMeta,
    pub graph: ProcessGraph,
    pub log: Vec<HistoricActivityRecord>,
    /// Vacío para instancias terminadas: el motor sólo informa de las vivas.
    pub engine_active_ids: Vec<String>,
}

impl InstanceCtx {
    /// Carga el snapshot de `instance_id`.
    pub fn load<P>(provider: &P, instance_id: &str) -> Result<Self, HistoryError>
        where P: EngineProvider + ?Sized
    {
        let meta = provider.instance(instance_id)
                           .ok_or_else(|| HistoryError::InstanceNotFound(instance_id.to_string()))?;
        let graph = provider.graph(&meta.process_definition_id)
                            .ok_or_else(|| HistoryError::DefinitionNotFound(meta.process_definition_id.clone()))?;
        let log = provider.historical_log(instance_id);
        let engine_active_ids = if meta.is_ended() {
            Vec::new()
        } else {
            provider.engine_active_ids(instance_id)
        };
        Ok(Self { meta,
                  graph,
                  log,
                  engine_active_ids })
    }

    #[inline]
    pub fn index(&self, max_depth: usize) -> Result<GraphIndex<'_>, HistoryError> {
        GraphIndex::build(&self.graph, max_depth)
    }

    /// Log normalizado contra el índice ya construido.
    #[inline]
    pub fn normalized(&self, index: &GraphIndex<'_>, max_depth: usize) -> Result<Vec<HistoricActivityRecord>, HistoryError> {
        normalize(&self.log, index, max_depth)
    }
}
