//! Resaltado de flujos recorridos ("highlighted flows").

mod reconstructor;

pub use reconstructor::{highlighted_transition_ids, reconstruct_flows};
