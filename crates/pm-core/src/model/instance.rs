//! Metadatos de instancias de proceso y elementos del árbol super/sub.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessInstanceMeta {
    pub id: String,
    pub process_definition_id: String,
    #[serde(default)]
    pub super_process_instance_id: Option<String>,
    #[serde(default)]
    pub business_key: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl ProcessInstanceMeta {
    pub fn new(id: impl Into<String>, process_definition_id: impl Into<String>) -> Self {
        Self { id: id.into(),
               process_definition_id: process_definition_id.into(),
               ..Default::default() }
    }

    pub fn with_super(mut self, super_id: impl Into<String>) -> Self {
        self.super_process_instance_id = Some(super_id.into());
        self
    }

    pub fn ended_at(mut self, ts: DateTime<Utc>) -> Self {
        self.end_time = Some(ts);
        self
    }

    pub fn with_variable(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(key.to_string(), value.into());
        self
    }

    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    /// Clave de la definición: el id hasta el primer `:` (`order:3:1207` -> `order`).
    pub fn definition_key(&self) -> &str {
        self.process_definition_id.split(':').next().unwrap_or_default()
    }
}

/// Referencia a una instancia viva o histórica.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceRef {
    Live(ProcessInstanceMeta),
    Historic(ProcessInstanceMeta),
}

impl InstanceRef {
    pub fn meta(&self) -> &ProcessInstanceMeta {
        match self {
            InstanceRef::Live(m) | InstanceRef::Historic(m) => m,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, InstanceRef::Live(_))
    }
}

/// Elemento del árbol de instancias con su nivel de profundidad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessInstanceItem {
    pub instance: InstanceRef,
    pub level: usize,
}

impl ProcessInstanceItem {
    pub fn new(instance: InstanceRef, level: usize) -> Self {
        Self { instance, level }
    }

    pub fn process_instance_id(&self) -> &str {
        &self.instance.meta().id
    }

    pub fn super_process_instance_id(&self) -> Option<&str> {
        self.instance.meta().super_process_instance_id.as_deref()
    }

    pub fn is_ended(&self) -> bool {
        self.instance.meta().is_ended()
    }
}

impl fmt::Display for ProcessInstanceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.instance.meta();
        write!(f, "ProcessInstanceItem [{}][{}]", meta.process_definition_id, meta.id)?;
        if meta.is_ended() {
            f.write_str(" ended")?;
        }
        Ok(())
    }
}
