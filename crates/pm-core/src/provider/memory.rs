use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

use super::EngineProvider;
use crate::errors::HistoryError;
use crate::model::{HistoricActivityRecord, ProcessGraph, ProcessInstanceMeta};

/// Provider en memoria. Útil en tests y para reproducir una instancia desde
/// un snapshot JSON exportado de las stores reales.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEngineProvider {
    graphs: HashMap<String, ProcessGraph>,
    // orden de inserción = orden natural de sub-instancias
    instances: IndexMap<String, ProcessInstanceMeta>,
    logs: HashMap<String, Vec<HistoricActivityRecord>>,
    active_ids: HashMap<String, Vec<String>>,
}

/// Forma serializada del snapshot.
#[derive(Debug, Deserialize)]
struct Snapshot {
    #[serde(default)]
    graphs: Vec<ProcessGraph>,
    #[serde(default)]
    instances: Vec<ProcessInstanceMeta>,
    #[serde(default)]
    logs: HashMap<String, Vec<HistoricActivityRecord>>,
    #[serde(default)]
    active: HashMap<String, Vec<String>>,
}

impl InMemoryEngineProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, HistoryError> {
        let snapshot: Snapshot = serde_json::from_str(raw)?;
        let mut provider = Self::new();
        for g in snapshot.graphs {
            provider.insert_graph(g);
        }
        for i in snapshot.instances {
            provider.insert_instance(i);
        }
        provider.logs = snapshot.logs;
        provider.active_ids = snapshot.active;
        Ok(provider)
    }

    pub fn insert_graph(&mut self, graph: ProcessGraph) {
        self.graphs.insert(graph.id.clone(), graph);
    }

    pub fn insert_instance(&mut self, meta: ProcessInstanceMeta) {
        self.instances.insert(meta.id.clone(), meta);
    }

    pub fn set_log(&mut self, instance_id: &str, records: Vec<HistoricActivityRecord>) {
        self.logs.insert(instance_id.to_string(), records);
    }

    pub fn set_active_ids(&mut self, instance_id: &str, ids: &[&str]) {
        self.active_ids
            .insert(instance_id.to_string(), ids.iter().map(|s| s.to_string()).collect());
    }

    pub fn with_graph(mut self, graph: ProcessGraph) -> Self {
        self.insert_graph(graph);
        self
    }

    pub fn with_instance(mut self, meta: ProcessInstanceMeta) -> Self {
        self.insert_instance(meta);
        self
    }

    pub fn with_log(mut self, instance_id: &str, records: Vec<HistoricActivityRecord>) -> Self {
        self.set_log(instance_id, records);
        self
    }

    pub fn with_active_ids(mut self, instance_id: &str, ids: &[&str]) -> Self {
        self.set_active_ids(instance_id, ids);
        self
    }
}

impl EngineProvider for InMemoryEngineProvider {
    fn graph(&self, definition_id: &str) -> Option<ProcessGraph> {
        self.graphs.get(definition_id).cloned()
    }

    fn historical_log(&self, instance_id: &str) -> Vec<HistoricActivityRecord> {
        let mut log = self.logs.get(instance_id).cloned().unwrap_or_default();
        // orden por start_time ascendente; sort estable conserva empates
        log.sort_by_key(|r| (r.start_time.is_none(), r.start_time));
        log
    }

    fn engine_active_ids(&self, instance_id: &str) -> Vec<String> {
        self.active_ids.get(instance_id).cloned().unwrap_or_default()
    }

    fn instance(&self, instance_id: &str) -> Option<ProcessInstanceMeta> {
        self.instances.get(instance_id).cloned()
    }

    fn sub_instances(&self, instance_id: &str) -> Vec<ProcessInstanceMeta> {
        self.instances
            .values()
            .filter(|m| m.super_process_instance_id.as_deref() == Some(instance_id))
            .cloned()
            .collect()
    }
}
