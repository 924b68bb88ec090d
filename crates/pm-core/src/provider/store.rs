use crate::model::{HistoricActivityRecord, ProcessGraph, ProcessInstanceMeta};

/// Acceso de sólo lectura a las stores del motor de procesos (grafo, log
/// histórico, ids activos y metadatos de instancias).
///
/// Contrato:
/// - `historical_log` devuelve los registros ordenados por `start_time`
///   ascendente; el motor no reordena.
/// - `engine_active_ids` sólo tiene sentido mientras la instancia corre.
/// - `sub_instances` devuelve las instancias cuyo `super_process_instance_id`
///   es `instance_id`, en el orden natural de la store.
pub trait EngineProvider {
    fn graph(&self, definition_id: &str) -> Option<ProcessGraph>;
    fn historical_log(&self, instance_id: &str) -> Vec<HistoricActivityRecord>;
    fn engine_active_ids(&self, instance_id: &str) -> Vec<String>;
    fn instance(&self, instance_id: &str) -> Option<ProcessInstanceMeta>;
    fn sub_instances(&self, instance_id: &str) -> Vec<ProcessInstanceMeta>;
}

impl<P: EngineProvider + ?Sized> EngineProvider for &P {
    fn graph(&self, definition_id: &str) -> Option<ProcessGraph> {
        (**self).graph(definition_id)
    }
    fn historical_log(&self, instance_id: &str) -> Vec<HistoricActivityRecord> {
        (**self).historical_log(instance_id)
    }
    fn engine_active_ids(&self, instance_id: &str) -> Vec<String> {
        (**self).engine_active_ids(instance_id)
    }
    fn instance(&self, instance_id: &str) -> Option<ProcessInstanceMeta> {
        (**self).instance(instance_id)
    }
    fn sub_instances(&self, instance_id: &str) -> Vec<ProcessInstanceMeta> {
        (**self).sub_instances(instance_id)
    }
}
