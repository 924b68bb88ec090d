//! Colaboradores externos: trait `EngineProvider` e implementación en memoria.

mod memory;
mod store;

pub use memory::InMemoryEngineProvider;
pub use store::EngineProvider;
