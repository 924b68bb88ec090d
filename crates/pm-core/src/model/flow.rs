use std::fmt;

use serde::Serialize;

use crate::model::{HistoricActivityRecord, Transition};

/// Registro histórico junto con la transición que se juzga recorrida para
/// llegar a él. Transitorio: se recalcula en cada petición.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricActivityInstanceFlow {
    pub record: HistoricActivityRecord,
    /// `false` si el id del registro ya no existe en el grafo (redeploy).
    pub activity_found: bool,
    /// Invariante: si existe, `destination_activity_id == record.activity_id`.
    pub incoming_transition: Option<Transition>,
    /// Transiciones entrantes cuyo origen se encontró en el log. Sólo se
    /// expone la última evaluada.
    pub satisfied_incoming: usize,
}

impl HistoricActivityInstanceFlow {
    pub fn incoming_transition_id(&self) -> Option<&str> {
        self.incoming_transition.as_ref().map(|t| t.id.as_str())
    }

    pub fn incoming_transition_name(&self) -> Option<&str> {
        self.incoming_transition.as_ref().and_then(Transition::name)
    }

    /// Más de una transición entrante satisfecha, sea cual sea el tipo de
    /// actividad (una unión exclusiva también puede cumplirlo).
    pub fn has_multiple_satisfied_incoming(&self) -> bool {
        self.satisfied_incoming > 1
    }

    /// Unión concurrente: gateway paralelo o inclusivo con varias ramas
    /// satisfechas.
    pub fn is_concurrent_join(&self) -> bool {
        self.record.activity_kind.is_join_capable() && self.has_multiple_satisfied_incoming()
    }
}

impl fmt::Display for HistoricActivityInstanceFlow {
    // (startevent1)--flow1-->usertask1
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(t) = &self.incoming_transition {
            write!(f, "({})--{}-->", t.source_activity_id, t.id)?;
        }
        write!(f, "{}", self.record.activity_id)?;
        if self.record.is_synthetic() {
            f.write_str(" [synthetic]")?;
        }
        Ok(())
    }
}
