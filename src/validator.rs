//! Referential-integrity check for submitted graphs.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::error::{Endpoint, GraphError, UnknownEndpoint};
use crate::graph::{Edge, Node, WeightField};

/// Reported in place of an edge ID when the edge was submitted without one.
pub const UNNAMED_EDGE: &str = "<unnamed edge>";

/// Counts reported for an accepted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphAcceptance {
    pub nodes: usize,
    pub edges: usize,
}

/// Validate a node/edge submission as a whole.
///
/// Node IDs and non-empty edge IDs must be unique, every edge endpoint must
/// name a declared node, and every weight an edge carries must be finite and
/// non-negative. Edges are checked in input order and the first offender
/// rejects the whole submission.
pub fn validate_graph(nodes: &[Node], edges: &[Edge]) -> Result<GraphAcceptance, GraphError> {
    let result = check(nodes, edges);
    match &result {
        Ok(acceptance) => debug!(
            nodes = acceptance.nodes,
            edges = acceptance.edges,
            "graph accepted"
        ),
        Err(err) => debug!(error = %err, "graph rejected"),
    }
    result
}

fn check(nodes: &[Node], edges: &[Edge]) -> Result<GraphAcceptance, GraphError> {
    let mut known: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !known.insert(node.id.as_str()) {
            return Err(GraphError::DuplicateNode {
                node_id: node.id.clone(),
            });
        }
    }

    let mut edge_ids: HashSet<&str> = HashSet::with_capacity(edges.len());
    for edge in edges {
        if !edge.id.is_empty() && !edge_ids.insert(edge.id.as_str()) {
            return Err(GraphError::DuplicateEdge {
                edge_id: edge.id.clone(),
            });
        }
        let unknown = unknown_endpoints(edge, &known);
        if !unknown.is_empty() {
            return Err(GraphError::ReferentialIntegrity {
                edge_id: display_id(edge),
                unknown,
            });
        }
        check_weights(edge)?;
    }

    Ok(GraphAcceptance {
        nodes: nodes.len(),
        edges: edges.len(),
    })
}

fn unknown_endpoints(edge: &Edge, known: &HashSet<&str>) -> Vec<UnknownEndpoint> {
    [
        (Endpoint::From, &edge.from_node_id),
        (Endpoint::To, &edge.to_node_id),
    ]
    .into_iter()
    .filter(|(_, node_id)| !known.contains(node_id.as_str()))
    .map(|(endpoint, node_id)| UnknownEndpoint {
        endpoint,
        node_id: node_id.clone(),
    })
    .collect()
}

fn check_weights(edge: &Edge) -> Result<(), GraphError> {
    for field in [WeightField::Distance, WeightField::Duration, WeightField::Cost] {
        if let Some(value) = edge.value(field) {
            if !value.is_finite() || value < 0.0 {
                return Err(GraphError::InvalidWeight {
                    edge_id: display_id(edge),
                    field,
                    value,
                });
            }
        }
    }
    Ok(())
}

fn display_id(edge: &Edge) -> String {
    if edge.id.is_empty() {
        UNNAMED_EDGE.to_string()
    } else {
        edge.id.clone()
    }
}
