//! Resolución de actividades activas de una instancia viva.

mod resolver;

pub use resolver::{resolve_active_ids, resolve_instance_active_ids};
