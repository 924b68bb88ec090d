//! Reconstrucción de flujos: qué transición entrante llevó la ejecución a
//! cada registro del log normalizado.
//!
//! Para cada registro se evalúan sus transiciones entrantes en orden de
//! declaración; una transición se cumple si su origen aparece en el log. En
//! joins (`parallelGateway`/`inclusiveGateway` con más de una entrada) el
//! origen además debe compartir `execution_id` con el registro: cada rama que
//! llega al join deja su propio registro del join con su ejecución.
use log::{debug, warn};

use crate::errors::HistoryError;
use crate::history::{find_record, find_record_in_execution};
use crate::model::{GraphIndex, HistoricActivityInstanceFlow, HistoricActivityRecord, Transition};

/// Un flujo por registro, en el orden del log.
pub fn reconstruct_flows(records: &[HistoricActivityRecord], graph: &GraphIndex<'_>) -> Vec<HistoricActivityInstanceFlow> {
    records.iter().map(|r| attribute(r, records, graph)).collect()
}

/// Ids de las transiciones atribuidas, conservando el orden de registros.
pub fn highlighted_transition_ids(flows: &[HistoricActivityInstanceFlow]) -> Vec<String> {
    flows.iter()
         .filter_map(|f| f.incoming_transition_id().map(str::to_string))
         .collect()
}

fn attribute(record: &HistoricActivityRecord,
             records: &[HistoricActivityRecord],
             graph: &GraphIndex<'_>)
             -> HistoricActivityInstanceFlow {
    if graph.find_activity(&record.activity_id).is_none() {
        let err = HistoryError::StructuralInconsistency(format!("historic activity '{}' not found in process graph",
                                                                record.activity_id));
        warn!("{err}");
        return HistoricActivityInstanceFlow { record: record.clone(),
                                              activity_found: false,
                                              incoming_transition: None,
                                              satisfied_incoming: 0 };
    }

    let incoming = graph.incoming(&record.activity_id);
    let join = record.activity_kind.is_join_capable() && incoming.len() > 1;

    let mut attributed: Option<&Transition> = None;
    let mut satisfied = 0;
    for &t in incoming {
        let source_present = if join {
            find_record_in_execution(records, &t.source_activity_id, record.execution_id.as_deref()).is_some()
        } else {
            find_record(records, &t.source_activity_id).is_some()
        };
        if source_present {
            // la última evaluada gana
            attributed = Some(t);
            satisfied += 1;
        }
    }
    if satisfied > 1 {
        debug!("activity '{}' has {} satisfied incoming transitions, exposing '{}'",
               record.activity_id,
               satisfied,
               attributed.map(|t| t.id.as_str()).unwrap_or_default());
    }

    HistoricActivityInstanceFlow { record: record.clone(),
                                   activity_found: true,
                                   incoming_transition: attributed.cloned(),
                                   satisfied_incoming: satisfied }
}
