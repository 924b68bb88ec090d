//! Grafo de definición (`ProcessGraph`) e índice de consulta (`GraphIndex`).
//!
//! El grafo es inmutable durante la reconstrucción. Las transiciones pueden
//! cruzar scopes (p. ej. del evento hijo de un `eventBasedGateway` hacia la
//! actividad siguiente del scope padre), por eso el índice aplana todos los
//! scopes anidados en un único mapa id -> actividad.
use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::HistoryError;
use crate::model::{Activity, Transition};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProcessGraph {
    /// Id de la definición (o del scope, para sub-grafos).
    pub id: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl ProcessGraph {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(),
               activities: Vec::new(),
               transitions: Vec::new() }
    }

    pub fn activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    pub fn transition(mut self, id: &str, source: &str, destination: &str) -> Self {
        self.transitions.push(Transition::new(id, source, destination));
        self
    }
}

/// Vista indexada de un `ProcessGraph` construida una vez por llamada.
///
/// Invariantes:
/// - Ante ids duplicados gana la primera declaración, y las actividades de un
///   scope se registran antes que las de sus scopes anidados.
/// - Una transición se indexa bajo el id de un extremo solo si ese extremo
///   resuelve a la declaración ganadora. El extremo se busca primero en el
///   scope que declara la transición; si no está ahí (transiciones que cruzan
///   scopes) se usa la declaración ganadora.
/// - `incoming`/`outgoing` conservan el orden de declaración (recorrido en
///   profundidad de scopes). La atribución "última evaluada" del
///   reconstructor depende de ese orden.
#[derive(Debug)]
pub struct GraphIndex<'g> {
    activities: IndexMap<&'g str, &'g Activity>,
    incoming: HashMap<&'g str, Vec<&'g Transition>>,
    outgoing: HashMap<&'g str, Vec<&'g Transition>>,
}

impl<'g> GraphIndex<'g> {
    /// Indexa el grafo y todos sus scopes. Falla con `RecursionLimitExceeded`
    /// si la anidación supera `max_depth`.
    pub fn build(graph: &'g ProcessGraph, max_depth: usize) -> Result<Self, HistoryError> {
        let mut index = GraphIndex { activities: IndexMap::new(),
                                     incoming: HashMap::new(),
                                     outgoing: HashMap::new() };
        index.collect(graph, 0, max_depth)?;
        index.link(graph);
        Ok(index)
    }

    fn collect(&mut self, scope: &'g ProcessGraph, depth: usize, max_depth: usize) -> Result<(), HistoryError> {
        if depth > max_depth {
            return Err(HistoryError::RecursionLimitExceeded { scope: "process graph",
                                                              limit: max_depth });
        }
        for activity in &scope.activities {
            if self.activities.contains_key(activity.id.as_str()) {
                warn!("duplicate activity id '{}' in scope '{}', keeping first declaration",
                      activity.id, scope.id);
            } else {
                self.activities.insert(activity.id.as_str(), activity);
            }
        }
        for activity in &scope.activities {
            if let Some(nested) = &activity.scope {
                self.collect(nested, depth + 1, max_depth)?;
            }
        }
        Ok(())
    }

    // La profundidad ya quedó acotada por `collect`.
    fn link(&mut self, scope: &'g ProcessGraph) {
        for t in &scope.transitions {
            if self.is_winning_endpoint(scope, &t.source_activity_id) {
                self.outgoing.entry(t.source_activity_id.as_str()).or_default().push(t);
            } else {
                debug!("transition '{}' leaves shadowed '{}' in scope '{}'",
                       t.id, t.source_activity_id, scope.id);
            }
            if self.is_winning_endpoint(scope, &t.destination_activity_id) {
                self.incoming.entry(t.destination_activity_id.as_str()).or_default().push(t);
            } else {
                debug!("transition '{}' enters shadowed '{}' in scope '{}'",
                       t.id, t.destination_activity_id, scope.id);
            }
        }
        for activity in &scope.activities {
            if let Some(nested) = &activity.scope {
                self.link(nested);
            }
        }
    }

    fn is_winning_endpoint(&self, scope: &ProcessGraph, id: &str) -> bool {
        let Some(local) = scope.activities.iter().find(|a| a.id == id) else {
            return true;
        };
        self.activities.get(id).map_or(true, |winner| std::ptr::eq(*winner, local))
    }

    pub fn find_activity(&self, id: &str) -> Option<&'g Activity> {
        self.activities.get(id).copied()
    }

    /// Todas las actividades, incluyendo hijos de subprocesos y de gateways
    /// por eventos. Las de cada scope preceden a las de sus scopes anidados.
    pub fn activities(&self) -> impl Iterator<Item = &'g Activity> + '_ {
        self.activities.values().copied()
    }

    pub fn incoming(&self, id: &str) -> &[&'g Transition] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outgoing(&self, id: &str) -> &[&'g Transition] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Actividades de origen de las transiciones entrantes. Las referencias
    /// colgantes se registran y se omiten.
    pub fn source_activities(&self, id: &str) -> Vec<&'g Activity> {
        self.incoming(id)
            .iter()
            .filter_map(|t| self.resolve_endpoint(t, &t.source_activity_id))
            .collect()
    }

    /// Actividades destino de las transiciones salientes.
    pub fn destination_activities(&self, id: &str) -> Vec<&'g Activity> {
        self.outgoing(id)
            .iter()
            .filter_map(|t| self.resolve_endpoint(t, &t.destination_activity_id))
            .collect()
    }

    fn resolve_endpoint(&self, t: &Transition, endpoint: &str) -> Option<&'g Activity> {
        let found = self.find_activity(endpoint);
        if found.is_none() {
            let err = HistoryError::StructuralInconsistency(format!("transition '{}' references missing activity '{}'",
                                                                    t.id, endpoint));
            warn!("{err}");
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityKind;

    fn nested(depth: usize) -> ProcessGraph {
        let mut g = ProcessGraph::new(format!("scope-{depth}")).activity(Activity::new(format!("leaf-{depth}"), "userTask"));
        for d in (0..depth).rev() {
            let sp = Activity::new(format!("sp-{d}"), ActivityKind::SubProcess).with_scope(g);
            g = ProcessGraph::new(format!("scope-{d}")).activity(sp);
        }
        g
    }

    #[test]
    fn index_flattens_nested_scopes() {
        let g = nested(3);
        let idx = GraphIndex::build(&g, 8).unwrap();
        assert!(idx.find_activity("leaf-3").is_some());
        assert!(idx.find_activity("sp-2").is_some());
        let ids: Vec<&str> = idx.activities().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["sp-0", "sp-1", "sp-2", "leaf-3"]);
    }

    #[test]
    fn index_rejects_nesting_past_ceiling() {
        let g = nested(5);
        let err = GraphIndex::build(&g, 2).unwrap_err();
        assert_eq!(err, HistoryError::RecursionLimitExceeded { scope: "process graph", limit: 2 });
    }

    #[test]
    fn dangling_transition_endpoints_are_skipped() {
        let g = ProcessGraph::new("p").activity(Activity::new("a", "userTask"))
                                      .activity(Activity::new("b", "userTask"))
                                      .transition("t1", "a", "b")
                                      .transition("t2", "ghost", "b");
        let idx = GraphIndex::build(&g, 4).unwrap();
        assert_eq!(idx.incoming("b").len(), 2);
        let sources: Vec<&str> = idx.source_activities("b").iter().map(|a| a.id.as_str()).collect();
        assert_eq!(sources, vec!["a"]);
        assert!(idx.outgoing("b").is_empty());
    }

    #[test]
    fn shadowed_declaration_keeps_its_own_edges() {
        let inner = ProcessGraph::new("sp-scope").activity(Activity::new("j", "userTask"))
                                                 .activity(Activity::new("x", "userTask"))
                                                 .transition("jx", "j", "x");
        let g = ProcessGraph::new("p").activity(Activity::new("sp", ActivityKind::SubProcess).with_scope(inner))
                                      .activity(Activity::new("j", ActivityKind::ParallelGateway))
                                      .activity(Activity::new("e", "userTask"))
                                      .transition("je", "j", "e");
        let idx = GraphIndex::build(&g, 4).unwrap();
        assert_eq!(idx.find_activity("j").unwrap().kind, ActivityKind::ParallelGateway);
        let out: Vec<&str> = idx.outgoing("j").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(out, vec!["je"]);
        let dest: Vec<&str> = idx.destination_activities("j").iter().map(|a| a.id.as_str()).collect();
        assert_eq!(dest, vec!["e"]);
        // El destino no está sombreado: la arista sigue siendo entrante de `x`.
        assert_eq!(idx.incoming("x").len(), 1);
    }

    #[test]
    fn cross_scope_transitions_reach_nested_children() {
        let eg_scope = ProcessGraph::new("eg").activity(Activity::new("evt", "intermediateCatchEvent"));
        let g = ProcessGraph::new("p").activity(Activity::new("gw", ActivityKind::EventBasedGateway).with_scope(eg_scope))
                                      .activity(Activity::new("x", "userTask"))
                                      .transition("g1", "gw", "evt")
                                      .transition("t1", "evt", "x");
        let idx = GraphIndex::build(&g, 4).unwrap();
        assert_eq!(idx.outgoing("evt").len(), 1);
        assert_eq!(idx.incoming("evt").len(), 1);
    }

    #[test]
    fn duplicate_ids_keep_first_declaration() {
        let g = ProcessGraph::new("p").activity(Activity::new("a", "userTask"))
                                      .activity(Activity::new("a", "scriptTask"));
        let idx = GraphIndex::build(&g, 4).unwrap();
        assert_eq!(idx.find_activity("a").unwrap().kind, ActivityKind::Task("userTask".into()));
    }
}
