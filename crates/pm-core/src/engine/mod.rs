//! Engine module: `HistoryEngine`, su builder y el contexto por instancia.

pub mod builder;
pub mod core;
pub mod instance_ctx;

pub use builder::EngineBuilder;
pub use self::core::HistoryEngine;
pub use instance_ctx::InstanceCtx;
