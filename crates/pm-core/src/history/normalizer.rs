//! Normalizador del log histórico.
//!
//! El motor de procesos no registra algunos nodos estructurales:
//! - la actividad inicial de un `subProcess`;
//! - el evento hijo elegido de un `eventBasedGateway`.
//!
//! Este módulo inserta registros sintéticos para ellos. Nunca reordena ni
//! elimina registros reales, y no muta el grafo ni los registros de entrada:
//! siempre devuelve una secuencia nueva.
//!
//! Terminación de la expansión de subprocesos: un registro sintético sólo se
//! inserta justo después de su padre, así que la cadena de ancestros se
//! reconstruye caminando hacia atrás. Un subproceso que ya aparece en su
//! propia cadena no se expande (grafo cíclico) y una cadena más larga que
//! `max_depth` corta la llamada con `RecursionLimitExceeded`.
use log::{debug, warn};

use super::lookup::has_engine_record;
use crate::errors::HistoryError;
use crate::model::{Activity, ActivityKind, GraphIndex, HistoricActivityRecord, SyntheticCause};

/// Normaliza el log: expande subprocesos hasta el punto fijo y luego
/// recupera las ramas elegidas de los gateways por eventos.
///
/// Es idempotente: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(records: &[HistoricActivityRecord],
                 graph: &GraphIndex<'_>,
                 max_depth: usize)
                 -> Result<Vec<HistoricActivityRecord>, HistoryError> {
    let mut current = insert_subprocess_starts(records, graph, max_depth)?;
    loop {
        let next = insert_subprocess_starts(&current, graph, max_depth)?;
        if next.len() == current.len() {
            break;
        }
        current = next;
    }
    let normalized = insert_event_gateway_branches(&current, graph);
    debug!("normalized {} records into {} ({} synthetic)",
           records.len(),
           normalized.len(),
           normalized.iter().filter(|r| r.is_synthetic()).count());
    Ok(normalized)
}

/// Una pasada de expansión: tras cada registro `subProcess` aún no expandido
/// inserta un registro sintético de su actividad inicial (`initial`).
///
/// Los sintéticos que son a su vez subprocesos se expanden en la pasada
/// siguiente.
pub fn insert_subprocess_starts(records: &[HistoricActivityRecord],
                                graph: &GraphIndex<'_>,
                                max_depth: usize)
                                -> Result<Vec<HistoricActivityRecord>, HistoryError> {
    let mut out = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        out.push(record.clone());
        if record.activity_kind != ActivityKind::SubProcess || already_expanded(records, i) {
            continue;
        }

        let ancestry = subprocess_ancestry(records, i);
        if ancestry.contains(&record.activity_id.as_str()) {
            warn!("subprocess '{}' is its own ancestor ({}), not expanding",
                  record.activity_id,
                  ancestry.join(" <- "));
            continue;
        }
        if ancestry.len() >= max_depth {
            return Err(HistoryError::RecursionLimitExceeded { scope: "subprocess expansion",
                                                              limit: max_depth });
        }

        let Some(initial) = initial_activity(graph, &record.activity_id) else {
            continue;
        };
        let cause = SyntheticCause::SubprocessStart { subprocess_id: record.activity_id.clone() };
        out.push(HistoricActivityRecord::synthetic(initial, cause, record.execution_id.clone()));
    }
    Ok(out)
}

/// Tras cada registro `eventBasedGateway` inserta un sintético por cada
/// evento hijo cuyo destino tiene un registro real en el log. Como mucho uno
/// por par (registro de gateway, evento hijo), en orden de declaración.
pub fn insert_event_gateway_branches(records: &[HistoricActivityRecord],
                                     graph: &GraphIndex<'_>)
                                     -> Vec<HistoricActivityRecord> {
    let mut out = Vec::with_capacity(records.len());
    let mut i = 0;
    while i < records.len() {
        let record = &records[i];
        out.push(record.clone());
        i += 1;
        if record.activity_kind != ActivityKind::EventBasedGateway {
            continue;
        }

        // ramas ya insertadas en una normalización previa
        let mut present: Vec<&str> = Vec::new();
        while let Some(next) = records.get(i) {
            match next.synthetic_cause() {
                Some(SyntheticCause::EventGatewayBranch { gateway_id }) if *gateway_id == record.activity_id => {
                    present.push(next.activity_id.as_str());
                    out.push(next.clone());
                    i += 1;
                }
                _ => break,
            }
        }

        let Some(gateway) = graph.find_activity(&record.activity_id) else {
            warn_missing(&record.activity_id, "event-based gateway");
            continue;
        };
        for event in gateway.children() {
            if present.contains(&event.id.as_str()) {
                continue;
            }
            let taken = graph.destination_activities(&event.id)
                             .iter()
                             .any(|next| has_engine_record(records, &next.id));
            if taken {
                let cause = SyntheticCause::EventGatewayBranch { gateway_id: record.activity_id.clone() };
                out.push(HistoricActivityRecord::synthetic(event, cause, record.execution_id.clone()));
            }
        }
    }
    out
}

fn already_expanded(records: &[HistoricActivityRecord], i: usize) -> bool {
    matches!(records.get(i + 1).and_then(|r| r.synthetic_cause()),
             Some(SyntheticCause::SubprocessStart { subprocess_id }) if *subprocess_id == records[i].activity_id)
}

/// Ids de los subprocesos que (transitivamente) generaron `records[i]`.
fn subprocess_ancestry(records: &[HistoricActivityRecord], i: usize) -> Vec<&str> {
    let mut chain = Vec::new();
    let mut j = i;
    while let Some(SyntheticCause::SubprocessStart { subprocess_id }) = records[j].synthetic_cause() {
        chain.push(subprocess_id.as_str());
        if j == 0 {
            break;
        }
        j -= 1;
    }
    chain
}

/// Actividad inicial declarada del subproceso. Se busca primero en su propio
/// scope: los ids sólo son únicos dentro de un grafo o sub-grafo.
fn initial_activity<'g>(graph: &GraphIndex<'g>, subprocess_id: &str) -> Option<&'g Activity> {
    let Some(subprocess) = graph.find_activity(subprocess_id) else {
        warn_missing(subprocess_id, "subprocess");
        return None;
    };
    let Some(initial_id) = subprocess.initial_id() else {
        warn!("subprocess '{subprocess_id}' declares no initial activity");
        return None;
    };
    let found = subprocess.children()
                          .iter()
                          .find(|a| a.id == initial_id)
                          .or_else(|| graph.find_activity(initial_id));
    if found.is_none() {
        warn_missing(initial_id, "subprocess initial activity");
    }
    found
}

fn warn_missing(activity_id: &str, role: &str) {
    let err = HistoryError::StructuralInconsistency(format!("{role} '{activity_id}' not found in process graph"));
    warn!("{err}");
}
