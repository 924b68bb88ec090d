//! Propiedades del normalizador, del resolvedor de activos y de la
//! atribución en joins.

use pm_core::active::resolve_active_ids;
use pm_core::highlight::reconstruct_flows;
use pm_core::history::normalize;
use pm_core::model::{Activity, GraphIndex, HistoricActivityRecord, ProcessGraph, RecordOrigin};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers / Strategies
// ---------------------------------------------------------------------------

const KNOWN: &[(&str, &str)] = &[("F", "parallelGateway"),
                                 ("A", "userTask"),
                                 ("B", "userTask"),
                                 ("J", "parallelGateway"),
                                 ("E", "endEvent"),
                                 ("SP", "subProcess"),
                                 ("EG", "eventBasedGateway"),
                                 ("ev1", "intermediateCatchEvent"),
                                 ("ghost", "subProcess")];

/// Fork/join, subproceso anidado y gateway por eventos en un mismo grafo.
fn mixed_graph() -> ProcessGraph {
    let inner = ProcessGraph::new("SP2").activity(Activity::new("sp-b", "startEvent"));
    let sub = ProcessGraph::new("SP").activity(Activity::new("sp-a", "startEvent"))
                                     .activity(Activity::new("SP2", "subProcess").with_initial("sp-b")
                                                                                 .with_scope(inner))
                                     .transition("sa", "sp-a", "SP2");
    let events = ProcessGraph::new("EG").activity(Activity::new("ev1", "intermediateCatchEvent"))
                                        .activity(Activity::new("ev2", "intermediateCatchEvent"));
    ProcessGraph::new("mix:1:1").activity(Activity::new("F", "parallelGateway"))
                                .activity(Activity::new("A", "userTask"))
                                .activity(Activity::new("B", "userTask"))
                                .activity(Activity::new("J", "parallelGateway"))
                                .activity(Activity::new("E", "endEvent"))
                                .activity(Activity::new("SP", "subProcess").with_initial("SP2").with_scope(sub))
                                .activity(Activity::new("EG", "eventBasedGateway").with_scope(events))
                                .transition("fa", "F", "A")
                                .transition("fb", "F", "B")
                                .transition("aj", "A", "J")
                                .transition("bj", "B", "J")
                                .transition("je", "J", "E")
                                .transition("e1", "ev1", "A")
                                .transition("e2", "ev2", "B")
}

fn arb_record() -> impl Strategy<Value = HistoricActivityRecord> {
    (0..KNOWN.len(), 1u8..4, any::<bool>()).prop_map(|(i, exec, ended)| {
                                                 let (id, kind) = KNOWN[i];
                                                 let mut r = HistoricActivityRecord::engine(id, kind).with_execution(exec.to_string());
                                                 if ended {
                                                     r = r.ended_at(chrono::Utc::now());
                                                 }
                                                 r
                                             })
}

fn arb_log() -> impl Strategy<Value = Vec<HistoricActivityRecord>> {
    prop::collection::vec(arb_record(), 0..12)
}

fn arb_active() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["A", "B", "J", "E", "F"]), 0..5)
        .prop_map(|ids| ids.into_iter().map(str::to_string).collect())
}

/// Orden de llegada de `n` ramas al join.
fn arb_join_order() -> impl Strategy<Value = Vec<usize>> {
    (2usize..7).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Resolver sobre su propia salida no añade nada.
    #[test]
    fn resolving_active_ids_is_idempotent(log in arb_log(), seed in arb_active()) {
        let g = mixed_graph();
        let idx = GraphIndex::build(&g, 8).unwrap();
        let once = resolve_active_ids(&seed, &log, &idx);
        let twice = resolve_active_ids(&once, &log, &idx);
        prop_assert_eq!(&once, &twice);
        for id in &seed {
            prop_assert!(once.contains(id));
        }
    }

    /// Los registros reales salen en el mismo orden y ninguno se pierde.
    #[test]
    fn normalize_preserves_real_records(log in arb_log()) {
        let g = mixed_graph();
        let idx = GraphIndex::build(&g, 8).unwrap();
        let out = normalize(&log, &idx, 8).unwrap();
        let real: Vec<HistoricActivityRecord> = out.iter()
                                                   .filter(|r| r.origin == RecordOrigin::Engine)
                                                   .cloned()
                                                   .collect();
        prop_assert_eq!(real, log);
    }

    #[test]
    fn normalize_is_idempotent(log in arb_log()) {
        let g = mixed_graph();
        let idx = GraphIndex::build(&g, 8).unwrap();
        let once = normalize(&log, &idx, 8).unwrap();
        let twice = normalize(&once, &idx, 8).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Cada registro del join se atribuye a la rama con su misma ejecución.
    #[test]
    fn join_records_never_cross_attribute(order in arb_join_order()) {
        let n = order.len();
        let mut graph = ProcessGraph::new("fan:1:1").activity(Activity::new("F", "parallelGateway"))
                                                    .activity(Activity::new("J", "parallelGateway"));
        for i in 0..n {
            graph = graph.activity(Activity::new(format!("T{i}"), "userTask"))
                         .transition(&format!("ft{i}"), "F", &format!("T{i}"))
                         .transition(&format!("tj{i}"), &format!("T{i}"), "J");
        }
        let idx = GraphIndex::build(&graph, 8).unwrap();

        let mut log = vec![HistoricActivityRecord::engine("F", "parallelGateway").with_execution("root")];
        for i in 0..n {
            log.push(HistoricActivityRecord::engine(format!("T{i}"), "userTask").with_execution(format!("e{i}")));
        }
        for &i in &order {
            log.push(HistoricActivityRecord::engine("J", "parallelGateway").with_execution(format!("e{i}")));
        }

        let flows = reconstruct_flows(&log, &idx);
        for flow in flows.iter().filter(|f| f.record.activity_id == "J") {
            let exec = flow.record.execution_id.as_deref().unwrap();
            let t = flow.incoming_transition.as_ref().unwrap();
            prop_assert_eq!(format!("T{}", &exec[1..]), t.source_activity_id.clone());
            prop_assert_eq!(flow.satisfied_incoming, 1);
        }
    }
}
