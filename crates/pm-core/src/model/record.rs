//! Registro histórico de actividad (`HistoricActivityRecord`).
//!
//! Un registro es un hecho del log del motor de procesos o, si `origin` es
//! `Synthetic`, una entrada insertada por el normalizador para un nodo que el
//! motor nunca registra. Los sintéticos no llevan timestamps.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Activity, ActivityKind};

/// Motivo de inserción de un registro sintético.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticCause {
    /// Actividad inicial de un subproceso registrado.
    SubprocessStart { subprocess_id: String },
    /// Evento hijo elegido de un gateway por eventos.
    EventGatewayBranch { gateway_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    #[default]
    Engine,
    Synthetic(SyntheticCause),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricActivityRecord {
    pub activity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(rename = "activity_type")]
    pub activity_kind: ActivityKind,
    #[serde(default)]
    pub execution_id: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin: RecordOrigin,
}

impl HistoricActivityRecord {
    /// Registro real, tal como lo reporta el motor.
    pub fn engine(activity_id: impl Into<String>, kind: impl Into<ActivityKind>) -> Self {
        Self { activity_id: activity_id.into(),
               activity_name: None,
               activity_kind: kind.into(),
               execution_id: None,
               start_time: None,
               end_time: None,
               origin: RecordOrigin::Engine }
    }

    /// Registro sintético para `activity`; hereda la ejecución del registro
    /// que lo precede.
    pub fn synthetic(activity: &Activity, cause: SyntheticCause, execution_id: Option<String>) -> Self {
        Self { activity_id: activity.id.clone(),
               activity_name: activity.name().map(str::to_string),
               activity_kind: activity.kind.clone(),
               execution_id,
               start_time: None,
               end_time: None,
               origin: RecordOrigin::Synthetic(cause) }
    }

    pub fn with_execution(mut self, execution_id: impl Into<String>) -> Self {
        self.execution_id = Some(execution_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.activity_name = Some(name.into());
        self
    }

    pub fn started_at(mut self, ts: DateTime<Utc>) -> Self {
        self.start_time = Some(ts);
        self
    }

    pub fn ended_at(mut self, ts: DateTime<Utc>) -> Self {
        self.end_time = Some(ts);
        self
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self.origin, RecordOrigin::Synthetic(_))
    }

    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn synthetic_cause(&self) -> Option<&SyntheticCause> {
        match &self.origin {
            RecordOrigin::Synthetic(cause) => Some(cause),
            RecordOrigin::Engine => None,
        }
    }
}
