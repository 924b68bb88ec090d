//! Árbol de instancias super/sub y ascenso a la instancia raíz.
use log::debug;

use crate::errors::HistoryError;
use crate::model::{InstanceRef, ProcessInstanceItem, ProcessInstanceMeta};
use crate::provider::EngineProvider;

/// Modo de recorrido del árbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeMode {
    /// Instancias terminadas y activas.
    Historical,
    /// Omite instancias terminadas junto con todo su subárbol.
    ActiveOnly,
}

/// Lista nivelada, en profundidad y pre-orden, de `root_id` y sus
/// sub-instancias transitivas. Los hijos se visitan en el orden natural del
/// provider.
pub fn build_instance_tree<P>(provider: &P,
                              root_id: &str,
                              mode: TreeMode,
                              max_depth: usize)
                              -> Result<Vec<ProcessInstanceItem>, HistoryError>
    where P: EngineProvider + ?Sized
{
    let root = provider.instance(root_id)
                       .ok_or_else(|| HistoryError::InstanceNotFound(root_id.to_string()))?;
    let mut items = Vec::new();
    collect(provider, root, 0, mode, max_depth, &mut items)?;
    debug!("instance tree of '{}' has {} items ({:?})", root_id, items.len(), mode);
    Ok(items)
}

fn collect<P>(provider: &P,
              meta: ProcessInstanceMeta,
              level: usize,
              mode: TreeMode,
              max_depth: usize,
              items: &mut Vec<ProcessInstanceItem>)
              -> Result<(), HistoryError>
    where P: EngineProvider + ?Sized
{
    if level > max_depth {
        return Err(HistoryError::RecursionLimitExceeded { scope: "instance tree",
                                                          limit: max_depth });
    }
    if mode == TreeMode::ActiveOnly && meta.is_ended() {
        return Ok(());
    }
    let id = meta.id.clone();
    let instance = match mode {
        TreeMode::Historical => InstanceRef::Historic(meta),
        TreeMode::ActiveOnly => InstanceRef::Live(meta),
    };
    items.push(ProcessInstanceItem::new(instance, level));
    for sub in provider.sub_instances(&id) {
        collect(provider, sub, level + 1, mode, max_depth, items)?;
    }
    Ok(())
}

/// Sube por `super_process_instance_id` hasta la instancia sin padre.
pub fn top_instance_id<P>(provider: &P, instance_id: &str, max_depth: usize) -> Result<String, HistoryError>
    where P: EngineProvider + ?Sized
{
    let mut current = provider.instance(instance_id)
                              .ok_or_else(|| HistoryError::InstanceNotFound(instance_id.to_string()))?;
    for _ in 0..=max_depth {
        let Some(super_id) = current.super_process_instance_id.take() else {
            return Ok(current.id);
        };
        current = provider.instance(&super_id)
                          .ok_or(HistoryError::InstanceNotFound(super_id))?;
    }
    Err(HistoryError::RecursionLimitExceeded { scope: "super instance chain",
                                               limit: max_depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryEngineProvider;
    use chrono::Utc;

    fn family() -> InMemoryEngineProvider {
        InMemoryEngineProvider::new().with_instance(ProcessInstanceMeta::new("I1", "order:1:1"))
                                     .with_instance(ProcessInstanceMeta::new("I2", "billing:1:2").with_super("I1"))
                                     .with_instance(ProcessInstanceMeta::new("I3", "invoice:1:3").with_super("I2"))
                                     .with_instance(ProcessInstanceMeta::new("I4", "ship:1:4").with_super("I1")
                                                                                             .ended_at(Utc::now()))
                                     .with_instance(ProcessInstanceMeta::new("I5", "track:1:5").with_super("I4"))
    }

    #[test]
    fn historical_tree_is_preorder_with_levels() {
        let items = build_instance_tree(&family(), "I1", TreeMode::Historical, 8).unwrap();
        let got: Vec<(&str, usize)> = items.iter().map(|i| (i.process_instance_id(), i.level)).collect();
        assert_eq!(got, vec![("I1", 0), ("I2", 1), ("I3", 2), ("I4", 1), ("I5", 2)]);
        assert!(items.iter().all(|i| !i.instance.is_live()));
    }

    #[test]
    fn active_only_prunes_ended_subtrees() {
        let items = build_instance_tree(&family(), "I1", TreeMode::ActiveOnly, 8).unwrap();
        let got: Vec<&str> = items.iter().map(|i| i.process_instance_id()).collect();
        assert_eq!(got, vec!["I1", "I2", "I3"]);
        assert!(items.iter().all(|i| i.instance.is_live()));
    }

    #[test]
    fn ended_root_in_active_mode_is_empty() {
        let items = build_instance_tree(&family(), "I4", TreeMode::ActiveOnly, 8).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn unknown_root_is_not_found() {
        let err = build_instance_tree(&family(), "nope", TreeMode::Historical, 8).unwrap_err();
        assert_eq!(err, HistoryError::InstanceNotFound("nope".into()));
    }

    #[test]
    fn top_instance_walks_to_root() {
        let p = family();
        assert_eq!(top_instance_id(&p, "I3", 8).unwrap(), "I1");
        assert_eq!(top_instance_id(&p, "I1", 8).unwrap(), "I1");
    }

    #[test]
    fn cyclic_parent_links_hit_the_ceiling() {
        let p = InMemoryEngineProvider::new().with_instance(ProcessInstanceMeta::new("a", "d").with_super("b"))
                                             .with_instance(ProcessInstanceMeta::new("b", "d").with_super("a"));
        let err = top_instance_id(&p, "a", 5).unwrap_err();
        assert_eq!(err, HistoryError::RecursionLimitExceeded { scope: "super instance chain", limit: 5 });
        let err = build_instance_tree(&p, "a", TreeMode::Historical, 5).unwrap_err();
        assert_eq!(err, HistoryError::RecursionLimitExceeded { scope: "instance tree", limit: 5 });
    }
}
