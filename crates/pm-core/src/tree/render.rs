//! Representaciones del árbol de instancias: volcado de texto indentado y
//! nodos anidados serializables.
use serde::Serialize;

use crate::model::ProcessInstanceItem;

const INDENT: &str = "    ";

/// Una línea por elemento, cuatro espacios por nivel.
pub fn dump_instance_tree(items: &[ProcessInstanceItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&INDENT.repeat(item.level));
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}

/// Nodo del árbol anidado (formato de vista en árbol).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub text: String,
    pub instance_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<TreeNode>,
}

impl TreeNode {
    fn from_item(item: &ProcessInstanceItem) -> Self {
        let meta = item.instance.meta();
        let mut text = format!("[{}] {}", meta.id, meta.definition_key());
        if meta.is_ended() {
            text.push_str(" (ended)");
        }
        Self { text,
               instance_id: meta.id.clone(),
               nodes: Vec::new() }
    }
}

/// Reconstruye el anidamiento a partir de la lista nivelada en pre-orden.
/// Un elemento cuelga del último elemento abierto con nivel menor.
pub fn instance_tree_nodes(items: &[ProcessInstanceItem]) -> Vec<TreeNode> {
    let mut roots = Vec::new();
    let mut open: Vec<(usize, TreeNode)> = Vec::new();
    for item in items {
        close_down_to(&mut open, &mut roots, item.level);
        open.push((item.level, TreeNode::from_item(item)));
    }
    close_down_to(&mut open, &mut roots, 0);
    roots
}

fn close_down_to(open: &mut Vec<(usize, TreeNode)>, roots: &mut Vec<TreeNode>, level: usize) {
    while open.last().is_some_and(|(l, _)| *l >= level) {
        let Some((_, done)) = open.pop() else { break };
        match open.last_mut() {
            Some((_, parent)) => parent.nodes.push(done),
            None => roots.push(done),
        }
    }
}
