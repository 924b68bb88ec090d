//! Normalización del log histórico y búsquedas sobre registros.

pub mod lookup;
pub mod normalizer;

pub use lookup::{find_record, find_record_in_execution, has_engine_record};
pub use normalizer::{insert_event_gateway_branches, insert_subprocess_starts, normalize};
