//! Árbol de instancias super/sub.

mod builder;
pub mod render;

pub use builder::{build_instance_tree, top_instance_id, TreeMode};
pub use render::{dump_instance_tree, instance_tree_nodes, TreeNode};
