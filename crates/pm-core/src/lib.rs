//! pm-core: motor de reconstrucción de historial de instancias de proceso.
//!
//! Normaliza el log histórico (registros sintéticos para inicios de
//! subproceso y ramas de gateways por eventos), reconstruye las transiciones
//! recorridas, corrige el conjunto de actividades activas y construye el árbol
//! de instancias super/sub.
pub mod active;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod highlight;
pub mod history;
#[cfg(feature = "introspection")]
pub mod introspect;
pub mod model;
pub mod provider;
pub mod tree;

pub use active::{resolve_active_ids, resolve_instance_active_ids};
pub use config::EngineConfig;
pub use engine::{EngineBuilder, HistoryEngine, InstanceCtx};
pub use errors::HistoryError;
pub use highlight::{highlighted_transition_ids, reconstruct_flows};
pub use history::normalize;
pub use model::{Activity, ActivityKind, GraphIndex, HistoricActivityInstanceFlow, HistoricActivityRecord, InstanceRef,
                ProcessGraph, ProcessInstanceItem, ProcessInstanceMeta, RecordOrigin, SyntheticCause, Transition};
pub use provider::{EngineProvider, InMemoryEngineProvider};
pub use tree::{build_instance_tree, dump_instance_tree, instance_tree_nodes, top_instance_id, TreeMode, TreeNode};
