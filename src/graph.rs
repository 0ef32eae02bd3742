//! In-memory location graph for a single planning request.
//!
//! Nodes and edges are plain data supplied by the caller. Edges are directed;
//! travel in both directions needs two edges. Nothing downstream mutates a
//! [`Graph`] once it is built.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GraphError;
use crate::validator::{self, GraphAcceptance};

/// Free-form attributes attached to nodes and edges.
pub type Attributes = Map<String, Value>;

/// What sort of place a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Facility,
    Hub,
    Address,
    Geo,
}

/// Latitude/longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A named location in the routing graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            coordinates: None,
            attributes: None,
            active: true,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates { lat, lng });
        self
    }
}

/// The edge attribute a solve minimises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightField {
    Distance,
    Duration,
    Cost,
}

impl fmt::Display for WeightField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightField::Distance => f.write_str("distanceKm"),
            WeightField::Duration => f.write_str("durationMin"),
            WeightField::Cost => f.write_str("cost"),
        }
    }
}

/// A directed, weighted connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Empty when the caller omitted it.
    #[serde(default)]
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default)]
    pub is_closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl Edge {
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        distance_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            from_node_id: from.into(),
            to_node_id: to.into(),
            distance_km,
            duration_min: None,
            cost: None,
            is_closed: false,
            attributes: None,
        }
    }

    pub fn with_duration(mut self, minutes: f64) -> Self {
        self.duration_min = Some(minutes);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn closed(mut self) -> Self {
        self.is_closed = true;
        self
    }

    /// The raw value of `field`, if the edge carries it.
    pub fn value(&self, field: WeightField) -> Option<f64> {
        match field {
            WeightField::Distance => Some(self.distance_km),
            WeightField::Duration => self.duration_min,
            WeightField::Cost => self.cost,
        }
    }

    /// Weight used by the solver. A missing duration or cost falls back to
    /// `distance_km`, never to zero.
    pub fn weight(&self, field: WeightField) -> f64 {
        self.value(field).unwrap_or(self.distance_km)
    }
}

/// Nodes and edges for one planning request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    /// Check referential integrity and weights. See [`validator::validate_graph`].
    pub fn validate(&self) -> Result<GraphAcceptance, GraphError> {
        validator::validate_graph(&self.nodes, &self.edges)
    }
}
