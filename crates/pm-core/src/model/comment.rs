//! Datos estructurados de comentarios de tareas.
use serde_json::{Map, Value};

/// Interpreta el mensaje completo de un comentario como objeto JSON. Si no lo
/// es (texto libre, JSON mal formado, o un JSON que no es objeto) devuelve
/// `{"message": <texto original>}`.
pub fn comment_data(full_message: &str) -> Map<String, Value> {
    match serde_json::from_str::<Map<String, Value>>(full_message) {
        Ok(data) => data,
        Err(_) => {
            let mut data = Map::new();
            data.insert("message".to_string(), Value::from(full_message));
            data
        }
    }
}
