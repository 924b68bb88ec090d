//! Volcado genérico de cualquier valor `Serialize` como árbol de nodos para
//! vistas de depuración. No participa en la reconstrucción.
use serde::Serialize;
use serde_json::Value;

use crate::constants::MAX_INTROSPECTION_LEVEL;
use crate::errors::HistoryError;

/// Nodo del árbol de introspección.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ObjectNode {
    pub text: String,
    pub level: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_list: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_null: bool,
    pub nodes: Vec<ObjectNode>,
}

/// Árbol de `value`. Con `include_nulls = false` se omiten los campos nulos.
pub fn object_tree<T: Serialize + ?Sized>(value: &T, include_nulls: bool) -> Result<ObjectNode, HistoryError> {
    let json = serde_json::to_value(value).map_err(|e| HistoryError::Serialization(e.to_string()))?;
    let mut root = walk(&json, 0, include_nulls)?;
    root.text = std::any::type_name::<T>().to_string();
    Ok(root)
}

fn walk(value: &Value, level: usize, include_nulls: bool) -> Result<ObjectNode, HistoryError> {
    if level > MAX_INTROSPECTION_LEVEL {
        return Err(HistoryError::RecursionLimitExceeded { scope: "object tree",
                                                          limit: MAX_INTROSPECTION_LEVEL });
    }
    let mut node = ObjectNode { level, ..Default::default() };
    match value {
        Value::Object(fields) => {
            for (name, field) in fields {
                if field.is_null() && !include_nulls {
                    continue;
                }
                node.nodes.push(field_node(name, field, level, include_nulls)?);
            }
        }
        Value::Array(items) => {
            node.is_list = true;
            node.nodes = list_items("", items, level, include_nulls)?;
        }
        other => node.text = scalar_text(other),
    }
    Ok(node)
}

fn field_node(name: &str, value: &Value, level: usize, include_nulls: bool) -> Result<ObjectNode, HistoryError> {
    let kind = type_label(value);
    let mut node = ObjectNode { level,
                                ..Default::default() };
    match value {
        Value::Null => {
            node.text = format!("{name} ({kind}) = null");
            node.is_null = true;
        }
        Value::Array(items) => {
            node.text = format!("{name} ({kind})");
            node.is_list = true;
            node.nodes = list_items(name, items, level, include_nulls)?;
        }
        Value::Object(_) => {
            node.text = format!("{name} ({kind})");
            node.nodes = walk(value, level + 1, include_nulls)?.nodes;
        }
        scalar => node.text = format!("{name} ({kind}) = {}", scalar_text(scalar)),
    }
    Ok(node)
}

fn list_items(name: &str, items: &[Value], level: usize, include_nulls: bool) -> Result<Vec<ObjectNode>, HistoryError> {
    let mut nodes = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        if item.is_null() && !include_nulls {
            continue;
        }
        let mut child = walk(item, level + 1, include_nulls)?;
        let label = format!("{name}[{i}] ({})", type_label(item));
        child.text = match item {
            Value::Object(_) | Value::Array(_) => label,
            Value::Null => {
                child.is_null = true;
                format!("{label} = null")
            }
            scalar => format!("{label} = {}", scalar_text(scalar)),
        };
        nodes.push(child);
    }
    Ok(nodes)
}

fn type_label(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
