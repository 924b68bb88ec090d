//! Corrección del conjunto de actividades activas.
//!
//! El motor de procesos marca un `parallelGateway` de unión como terminado
//! en cuanto llega la primera rama, aunque siga esperando a las demás. Un
//! join terminado en el log, con al menos dos orígenes en el grafo y sin
//! ningún destino registrado todavía, sigue en realidad esperando y se añade
//! al conjunto activo.
//!
//! `inclusiveGateway` queda fuera de la corrección a propósito: su aridad
//! depende de los datos de la instancia.
use indexmap::IndexSet;
use log::debug;

use crate::history::find_record;
use crate::model::{ActivityKind, GraphIndex, HistoricActivityRecord, ProcessInstanceMeta};

/// Conjunto activo corregido de una instancia en ejecución. Sólo añade ids a
/// `engine_active_ids` (conserva su orden y descarta repetidos); aplicarlo
/// sobre su propia salida devuelve lo mismo.
pub fn resolve_active_ids(engine_active_ids: &[String],
                          records: &[HistoricActivityRecord],
                          graph: &GraphIndex<'_>)
                          -> Vec<String> {
    let mut active: IndexSet<String> = engine_active_ids.iter().cloned().collect();
    for record in records {
        if record.activity_kind != ActivityKind::ParallelGateway || !record.is_ended() {
            continue;
        }
        if active.contains(&record.activity_id) {
            continue;
        }
        if is_waiting_join(&record.activity_id, records, graph) {
            debug!("parallel join '{}' still waiting for incoming branches", record.activity_id);
            active.insert(record.activity_id.clone());
        }
    }
    active.into_iter().collect()
}

/// Igual que `resolve_active_ids` pero con la precondición de instancia: una
/// instancia terminada nunca tiene actividades activas.
pub fn resolve_instance_active_ids(instance: &ProcessInstanceMeta,
                                   engine_active_ids: &[String],
                                   records: &[HistoricActivityRecord],
                                   graph: &GraphIndex<'_>)
                                   -> Vec<String> {
    if instance.is_ended() {
        return Vec::new();
    }
    resolve_active_ids(engine_active_ids, records, graph)
}

fn is_waiting_join(gateway_id: &str, records: &[HistoricActivityRecord], graph: &GraphIndex<'_>) -> bool {
    let sources: IndexSet<&str> = graph.source_activities(gateway_id)
                                       .into_iter()
                                       .map(|a| a.id.as_str())
                                       .collect();
    if sources.len() < 2 {
        return false;
    }
    !graph.destination_activities(gateway_id)
          .iter()
          .any(|next| find_record(records, &next.id).is_some())
}
