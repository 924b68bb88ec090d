use chrono::Utc;
use pm_core::model::{InstanceRef, ProcessInstanceMeta};
use pm_core::provider::InMemoryEngineProvider;
use pm_core::tree::{build_instance_tree, dump_instance_tree, instance_tree_nodes, top_instance_id, TreeMode};
use pm_core::HistoryError;

/// I1
/// ├── I2
/// │   └── I3
/// └── I4 (terminada)
///     └── I5
fn instances() -> InMemoryEngineProvider {
    InMemoryEngineProvider::new().with_instance(ProcessInstanceMeta::new("I1", "order:2:10"))
                                 .with_instance(ProcessInstanceMeta::new("I2", "billing:1:11").with_super("I1"))
                                 .with_instance(ProcessInstanceMeta::new("I4", "shipping:4:12").with_super("I1")
                                                                                               .ended_at(Utc::now()))
                                 .with_instance(ProcessInstanceMeta::new("I3", "invoice:1:13").with_super("I2"))
                                 .with_instance(ProcessInstanceMeta::new("I5", "tracking:1:14").with_super("I4"))
}

#[test]
fn top_instance_of_a_grandchild_is_the_root() {
    let p = instances();
    assert_eq!(top_instance_id(&p, "I3", 16).unwrap(), "I1");
    assert_eq!(top_instance_id(&p, "I5", 16).unwrap(), "I1");
}

#[test]
fn top_instance_with_broken_parent_link_is_not_found() {
    let p = InMemoryEngineProvider::new().with_instance(ProcessInstanceMeta::new("child", "x:1:1").with_super("gone"));
    assert_eq!(top_instance_id(&p, "child", 16).unwrap_err(),
               HistoryError::InstanceNotFound("gone".into()));
}

#[test]
fn historical_dump_lists_every_instance() {
    let items = build_instance_tree(&instances(), "I1", TreeMode::Historical, 16).unwrap();
    let dump = dump_instance_tree(&items);
    let expected = ["ProcessInstanceItem [order:2:10][I1]",
                    "    ProcessInstanceItem [billing:1:11][I2]",
                    "        ProcessInstanceItem [invoice:1:13][I3]",
                    "    ProcessInstanceItem [shipping:4:12][I4] ended",
                    "        ProcessInstanceItem [tracking:1:14][I5]"];
    assert_eq!(dump.lines().collect::<Vec<_>>(), expected);
    assert!(items.iter().all(|i| matches!(i.instance, InstanceRef::Historic(_))));
}

#[test]
fn active_only_skips_ended_subtree() {
    let items = build_instance_tree(&instances(), "I1", TreeMode::ActiveOnly, 16).unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.process_instance_id()).collect();
    assert_eq!(ids, vec!["I1", "I2", "I3"]);
}

#[test]
fn subtree_from_an_inner_instance_starts_at_level_zero() {
    let items = build_instance_tree(&instances(), "I2", TreeMode::Historical, 16).unwrap();
    assert_eq!(items[0].level, 0);
    assert_eq!(items[0].super_process_instance_id(), Some("I1"));
    assert_eq!(items[1].level, 1);
}

#[test]
fn tree_deeper_than_ceiling_fails() {
    let mut p = InMemoryEngineProvider::new().with_instance(ProcessInstanceMeta::new("n0", "chain:1:1"));
    for n in 1..6 {
        p.insert_instance(ProcessInstanceMeta::new(format!("n{n}"), "chain:1:1").with_super(format!("n{}", n - 1)));
    }
    assert_eq!(build_instance_tree(&p, "n0", TreeMode::Historical, 5).unwrap().len(), 6);
    assert_eq!(build_instance_tree(&p, "n0", TreeMode::Historical, 3).unwrap_err(),
               HistoryError::RecursionLimitExceeded { scope: "instance tree", limit: 3 });
    assert_eq!(top_instance_id(&p, "n5", 3).unwrap_err(),
               HistoryError::RecursionLimitExceeded { scope: "super instance chain", limit: 3 });
    assert_eq!(top_instance_id(&p, "n5", 5).unwrap(), "n0");
}

#[test]
fn nodes_serialize_as_nested_tree() {
    let items = build_instance_tree(&instances(), "I1", TreeMode::Historical, 16).unwrap();
    let json = serde_json::to_value(instance_tree_nodes(&items)).unwrap();
    assert_eq!(json[0]["text"], "[I1] order");
    assert_eq!(json[0]["nodes"][1]["text"], "[I4] shipping (ended)");
    assert_eq!(json[0]["nodes"][1]["nodes"][0]["instance_id"], "I5");
    assert!(json[0]["nodes"][0]["nodes"][0].get("nodes").is_none());
}
