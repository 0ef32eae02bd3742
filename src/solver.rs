//! Single-source shortest path over a location graph.
//!
//! Label-setting (Dijkstra) search with a binary heap. Weights are assumed
//! non-negative; the validator rejects graphs that break this. When two
//! unsettled nodes share the smallest tentative distance, the node with the
//! lexicographically smaller ID is settled first, so repeated solves of the
//! same input always return the same path.

use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::graph::{Edge, Graph, WeightField};
use crate::model::PlanConstraints;

/// Whether forbidden-node constraints also apply to a task's own origin and
/// destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForbiddenEndpoints {
    /// A forbidden origin or destination makes the task infeasible.
    #[default]
    Reject,
    /// Forbidden nodes only block intermediate hops.
    Allow,
}

/// Edges and nodes a solve must not use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exclusions {
    pub closed_edges: HashSet<String>,
    pub forbidden_nodes: HashSet<String>,
    pub endpoints: ForbiddenEndpoints,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_constraints(constraints: &PlanConstraints, endpoints: ForbiddenEndpoints) -> Self {
        Self {
            closed_edges: constraints.closed_edge_ids.iter().cloned().collect(),
            forbidden_nodes: constraints.forbidden_node_ids.iter().cloned().collect(),
            endpoints,
        }
    }

    pub fn close_edge(mut self, edge_id: impl Into<String>) -> Self {
        self.closed_edges.insert(edge_id.into());
        self
    }

    pub fn forbid_node(mut self, node_id: impl Into<String>) -> Self {
        self.forbidden_nodes.insert(node_id.into());
        self
    }

    pub fn with_endpoints(mut self, endpoints: ForbiddenEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Closed either by the request or by the edge's own flag. An unnamed
    /// edge can only be closed by its flag.
    pub fn is_closed(&self, edge: &Edge) -> bool {
        edge.is_closed || (!edge.id.is_empty() && self.closed_edges.contains(&edge.id))
    }

    pub fn is_forbidden(&self, node_id: &str) -> bool {
        self.forbidden_nodes.contains(node_id)
    }

    fn rejects_endpoints(&self, start: &str, target: &str) -> bool {
        self.endpoints == ForbiddenEndpoints::Reject
            && (self.is_forbidden(start) || self.is_forbidden(target))
    }
}

/// A minimum-weight path. `nodes` runs from start to target inclusive and
/// `edges` holds the IDs of the edges traversed between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolvedPath {
    pub nodes: Vec<String>,
    pub edges: Vec<String>,
    pub weight: f64,
}

impl SolvedPath {
    fn trivial(node: &str) -> Self {
        Self {
            nodes: vec![node.to_string()],
            edges: Vec::new(),
            weight: 0.0,
        }
    }

    pub fn hops(&self) -> usize {
        self.edges.len()
    }
}

/// Solve a single query against `graph`.
///
/// Returns `None` when the target cannot be reached under `exclusions`.
/// When `start == target` the path is trivial and no edge is examined.
pub fn shortest_path(
    graph: &Graph,
    start: &str,
    target: &str,
    weight: WeightField,
    exclusions: &Exclusions,
) -> Option<SolvedPath> {
    if exclusions.rejects_endpoints(start, target) {
        return None;
    }
    if start == target {
        return Some(SolvedPath::trivial(start));
    }
    SearchGraph::new(graph, weight, exclusions).solve(start, target)
}

#[derive(Debug, Clone, Copy)]
struct Transition {
    to: usize,
    weight: f64,
    edge: usize,
}

/// The adjacency projection of a graph for one weight field and one set of
/// exclusions, shared read-only by every solve of a plan.
///
/// Closed edges are dropped when the projection is built. Edges touching a
/// forbidden node are kept and filtered per solve, since under
/// [`ForbiddenEndpoints::Allow`] whether a node is passable depends on the
/// query's own endpoints.
#[derive(Debug)]
pub struct SearchGraph<'a> {
    graph: &'a Graph,
    exclusions: &'a Exclusions,
    /// Node IDs in lexicographic order; a node's index is its tie-break rank.
    ids: Vec<&'a str>,
    index: HashMap<&'a str, usize>,
    forbidden: Vec<bool>,
    adjacency: Vec<Vec<Transition>>,
}

impl<'a> SearchGraph<'a> {
    pub fn new(graph: &'a Graph, weight: WeightField, exclusions: &'a Exclusions) -> Self {
        let ids: Vec<&str> = graph
            .edges
            .iter()
            .flat_map(|edge| [edge.from_node_id.as_str(), edge.to_node_id.as_str()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let forbidden = ids.iter().map(|id| exclusions.is_forbidden(id)).collect();

        let mut adjacency = vec![Vec::new(); ids.len()];
        let mut closed = 0usize;
        for (edge_index, edge) in graph.edges.iter().enumerate() {
            if exclusions.is_closed(edge) {
                closed += 1;
                continue;
            }
            let from = index[edge.from_node_id.as_str()];
            let to = index[edge.to_node_id.as_str()];
            adjacency[from].push(Transition {
                to,
                weight: edge.weight(weight),
                edge: edge_index,
            });
        }

        debug!(
            nodes = ids.len(),
            edges = graph.edges.len(),
            closed,
            forbidden = exclusions.forbidden_nodes.len(),
            weight = %weight,
            "prepared search graph"
        );

        Self {
            graph,
            exclusions,
            ids,
            index,
            forbidden,
            adjacency,
        }
    }

    /// Nodes incident to at least one edge, open or closed.
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Open transitions after closed edges were dropped.
    pub fn transition_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Minimum-weight path from `start` to `target`, or `None` if there is none.
    ///
    /// Each call owns its distance and predecessor state, so one
    /// `SearchGraph` can serve concurrent solves.
    pub fn solve(&self, start: &str, target: &str) -> Option<SolvedPath> {
        if self.exclusions.rejects_endpoints(start, target) {
            return None;
        }
        if start == target {
            return Some(SolvedPath::trivial(start));
        }

        // A node that is on no edge has no transitions in or out.
        let start_idx = *self.index.get(start)?;
        let target_idx = *self.index.get(target)?;

        let n = self.ids.len();
        let mut distance = vec![f64::INFINITY; n];
        let mut previous: Vec<Option<(usize, usize)>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut queue = BinaryHeap::new();

        distance[start_idx] = 0.0;
        queue.push(Reverse(Label {
            distance: 0.0,
            node: start_idx,
        }));

        while let Some(Reverse(Label { distance: current, node })) = queue.pop() {
            if settled[node] {
                continue;
            }
            settled[node] = true;
            if node == target_idx {
                break;
            }

            for transition in &self.adjacency[node] {
                let next = transition.to;
                if settled[next] || !self.passable(next, start_idx, target_idx) {
                    continue;
                }
                let candidate = current + transition.weight;
                if candidate < distance[next] {
                    distance[next] = candidate;
                    previous[next] = Some((node, transition.edge));
                    queue.push(Reverse(Label {
                        distance: candidate,
                        node: next,
                    }));
                }
            }
        }

        if !settled[target_idx] || !distance[target_idx].is_finite() {
            return None;
        }

        Some(self.reconstruct(&previous, target_idx, distance[target_idx]))
    }

    fn passable(&self, node: usize, start: usize, target: usize) -> bool {
        if !self.forbidden[node] {
            return true;
        }
        self.exclusions.endpoints == ForbiddenEndpoints::Allow && (node == start || node == target)
    }

    fn reconstruct(
        &self,
        previous: &[Option<(usize, usize)>],
        target: usize,
        weight: f64,
    ) -> SolvedPath {
        let mut nodes = vec![self.ids[target].to_string()];
        let mut edges = Vec::new();
        let mut current = target;
        while let Some((node, edge)) = previous[current] {
            nodes.push(self.ids[node].to_string());
            edges.push(self.graph.edges[edge].id.clone());
            current = node;
        }
        nodes.reverse();
        edges.reverse();
        SolvedPath {
            nodes,
            edges,
            weight,
        }
    }
}

/// Heap entry. Orders by distance, then by node rank.
#[derive(Debug, Clone, Copy)]
struct Label {
    distance: f64,
    node: usize,
}

impl Ord for Label {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for Label {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Label {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Node, NodeKind};

    fn graph(edges: Vec<Edge>) -> Graph {
        let mut ids: Vec<String> = edges
            .iter()
            .flat_map(|edge| [edge.from_node_id.clone(), edge.to_node_id.clone()])
            .collect();
        ids.sort();
        ids.dedup();
        let nodes = ids.into_iter().map(|id| Node::new(id, NodeKind::Address)).collect();
        Graph::new(nodes, edges)
    }

    #[test]
    fn test_label_heap_pops_smallest_distance_then_smallest_rank() {
        let mut heap = BinaryHeap::new();
        heap.push(Reverse(Label { distance: 2.0, node: 0 }));
        heap.push(Reverse(Label { distance: 1.0, node: 5 }));
        heap.push(Reverse(Label { distance: 1.0, node: 3 }));
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|Reverse(l)| l.node)).collect();
        assert_eq!(order, vec![3, 5, 0]);
    }

    #[test]
    fn test_equal_cost_paths_break_ties_by_node_id() {
        // A->B->D and A->C->D both weigh 2; B settles before C.
        let g = graph(vec![
            Edge::new("ac", "A", "C", 1.0),
            Edge::new("ab", "A", "B", 1.0),
            Edge::new("cd", "C", "D", 1.0),
            Edge::new("bd", "B", "D", 1.0),
        ]);
        let path = shortest_path(&g, "A", "D", WeightField::Distance, &Exclusions::new()).unwrap();
        assert_eq!(path.nodes, vec!["A", "B", "D"]);
        assert_eq!(path.edges, vec!["ab", "bd"]);
    }

    #[test]
    fn test_closed_edges_not_in_projection() {
        let g = graph(vec![
            Edge::new("ab", "A", "B", 1.0),
            Edge::new("bc", "B", "C", 1.0).closed(),
            Edge::new("ac", "A", "C", 5.0),
        ]);
        let exclusions = Exclusions::new().close_edge("ac");
        let search = SearchGraph::new(&g, WeightField::Distance, &exclusions);
        assert_eq!(search.node_count(), 3);
        assert_eq!(search.transition_count(), 1);
        assert!(search.solve("A", "C").is_none());
    }

    #[test]
    fn test_start_not_on_any_edge_has_no_path() {
        let g = graph(vec![Edge::new("ab", "A", "B", 1.0)]);
        let exclusions = Exclusions::new();
        let search = SearchGraph::new(&g, WeightField::Distance, &exclusions);
        assert!(search.solve("Z", "B").is_none());
        assert!(search.solve("A", "Z").is_none());
    }

    #[test]
    fn test_zero_weight_edge_is_used() {
        let g = graph(vec![
            Edge::new("ab", "A", "B", 3.0).with_cost(0.0),
            Edge::new("bc", "B", "C", 3.0).with_cost(0.0),
            Edge::new("ac", "A", "C", 1.0).with_cost(1.0),
        ]);
        let path = shortest_path(&g, "A", "C", WeightField::Cost, &Exclusions::new()).unwrap();
        assert_eq!(path.weight, 0.0);
        assert_eq!(path.hops(), 2);
    }

    #[test]
    fn test_search_graph_is_reusable_across_queries() {
        let g = graph(vec![
            Edge::new("ab", "A", "B", 2.0),
            Edge::new("bc", "B", "C", 2.0),
            Edge::new("ca", "C", "A", 2.0),
        ]);
        let exclusions = Exclusions::new();
        let search = SearchGraph::new(&g, WeightField::Distance, &exclusions);
        assert_eq!(search.solve("A", "C").map(|p| p.weight), Some(4.0));
        assert_eq!(search.solve("C", "B").map(|p| p.weight), Some(4.0));
        assert_eq!(search.solve("B", "B").map(|p| p.weight), Some(0.0));
    }
}
