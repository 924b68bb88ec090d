//! Constantes del motor de reconstrucción.
//!
//! Agrupa los nombres de propiedades que el motor de procesos deja en las
//! actividades y los techos por defecto que acotan los recorridos recursivos
//! (scopes anidados de subprocesos y árbol super/sub de instancias).

/// Propiedad de un `subProcess` que referencia su actividad inicial.
pub const PROPERTY_INITIAL: &str = "initial";

/// Propiedad con el nombre legible de una actividad o transición.
pub const PROPERTY_NAME: &str = "name";

/// Profundidad máxima de scopes anidados (subprocesos dentro de subprocesos)
/// antes de considerar el grafo corrupto.
pub const DEFAULT_MAX_SUBPROCESS_DEPTH: usize = 32;

/// Profundidad máxima del árbol de instancias super/sub.
pub const DEFAULT_MAX_INSTANCE_DEPTH: usize = 64;

/// Niveles máximos del volcado de introspección.
#[cfg(feature = "introspection")]
pub const MAX_INTROSPECTION_LEVEL: usize = 25;
