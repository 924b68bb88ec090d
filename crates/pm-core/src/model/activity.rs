//! Nodos (`Activity`) y aristas (`Transition`) del grafo de definición.
//!
//! El motor de procesos etiqueta cada nodo con un string de tipo
//! (`parallelGateway`, `userTask`, ...). Aquí se cierra en `ActivityKind`,
//! conservando el string original en las variantes abiertas para que tipos
//! desconocidos atraviesen el motor sin expandirse.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{PROPERTY_INITIAL, PROPERTY_NAME};
use crate::model::ProcessGraph;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityKind {
    SubProcess,
    ParallelGateway,
    InclusiveGateway,
    ExclusiveGateway,
    EventBasedGateway,
    StartEvent,
    EndEvent,
    CallActivity,
    /// `userTask`, `serviceTask`, `scriptTask`, ...
    Task(String),
    /// Eventos intermedios, de borde y variantes de inicio/fin.
    Event(String),
    Other(String),
}

impl ActivityKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "subProcess" => Self::SubProcess,
            "parallelGateway" => Self::ParallelGateway,
            "inclusiveGateway" => Self::InclusiveGateway,
            "exclusiveGateway" => Self::ExclusiveGateway,
            "eventBasedGateway" => Self::EventBasedGateway,
            "startEvent" => Self::StartEvent,
            "endEvent" => Self::EndEvent,
            "callActivity" => Self::CallActivity,
            t if t == "task" || t.ends_with("Task") => Self::Task(t.to_string()),
            e if e.contains("Event") || e.starts_with("intermediate") || e.starts_with("boundary") => {
                Self::Event(e.to_string())
            }
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::SubProcess => "subProcess",
            Self::ParallelGateway => "parallelGateway",
            Self::InclusiveGateway => "inclusiveGateway",
            Self::ExclusiveGateway => "exclusiveGateway",
            Self::EventBasedGateway => "eventBasedGateway",
            Self::StartEvent => "startEvent",
            Self::EndEvent => "endEvent",
            Self::CallActivity => "callActivity",
            Self::Task(raw) | Self::Event(raw) | Self::Other(raw) => raw,
        }
    }

    /// Gateways que sincronizan ramas cuando tienen más de una entrada.
    pub fn is_join_capable(&self) -> bool {
        matches!(self, Self::ParallelGateway | Self::InclusiveGateway)
    }
}

impl From<String> for ActivityKind {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for ActivityKind {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<ActivityKind> for String {
    fn from(kind: ActivityKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nodo del grafo. `scope` contiene el sub-grafo de un `subProcess` o los
/// eventos hijos declarados de un `eventBasedGateway`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ProcessGraph>,
}

impl Activity {
    pub fn new(id: impl Into<String>, kind: impl Into<ActivityKind>) -> Self {
        Self { id: id.into(),
               kind: kind.into(),
               properties: Map::new(),
               scope: None }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn with_name(self, name: &str) -> Self {
        self.with_property(PROPERTY_NAME, name)
    }

    pub fn with_initial(self, initial_id: &str) -> Self {
        self.with_property(PROPERTY_INITIAL, initial_id)
    }

    pub fn with_scope(mut self, scope: ProcessGraph) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get(PROPERTY_NAME).and_then(Value::as_str)
    }

    /// Actividad inicial declarada de un subproceso.
    pub fn initial_id(&self) -> Option<&str> {
        self.properties.get(PROPERTY_INITIAL).and_then(Value::as_str)
    }

    /// Hijos directos (eventos de un gateway, nodos de un subproceso).
    pub fn children(&self) -> &[Activity] {
        self.scope.as_ref().map(|s| s.activities.as_slice()).unwrap_or(&[])
    }
}

/// Arista dirigida entre dos actividades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    #[serde(rename = "source")]
    pub source_activity_id: String,
    #[serde(rename = "destination")]
    pub destination_activity_id: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
}

impl Transition {
    pub fn new(id: impl Into<String>, source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self { id: id.into(),
               source_activity_id: source.into(),
               destination_activity_id: destination.into(),
               properties: Map::new() }
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get(PROPERTY_NAME).and_then(Value::as_str)
    }
}
