//! Modelos neutrales (Activity, Transition, ProcessGraph, registros
//! históricos, flujos e instancias).

pub mod activity;
pub mod comment;
pub mod flow;
pub mod graph;
pub mod instance;
pub mod record;

pub use activity::{Activity, ActivityKind, Transition};
pub use comment::comment_data;
pub use flow::HistoricActivityInstanceFlow;
pub use graph::{GraphIndex, ProcessGraph};
pub use instance::{InstanceRef, ProcessInstanceItem, ProcessInstanceMeta};
pub use record::{HistoricActivityRecord, RecordOrigin, SyntheticCause};
