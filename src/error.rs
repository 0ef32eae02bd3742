//! Error taxonomy for graph validation and plan creation.
//!
//! Every variant is terminal for the request that produced it: nothing in the
//! crate retries, downgrades, or routes around a failure.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::graph::WeightField;
use crate::model::Objective;

/// Which end of a directed edge a node reference sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::From => f.write_str("from"),
            Endpoint::To => f.write_str("to"),
        }
    }
}

/// An edge endpoint that names a node missing from the node set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownEndpoint {
    pub endpoint: Endpoint,
    pub node_id: String,
}

impl fmt::Display for UnknownEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} node '{}'", self.endpoint, self.node_id)
    }
}

/// A submitted graph was rejected. No part of it is accepted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// An edge references a node that was not declared.
    #[error("edge '{edge_id}' references unknown {}", describe_unknown(.unknown))]
    ReferentialIntegrity {
        edge_id: String,
        unknown: Vec<UnknownEndpoint>,
    },
    #[error("node '{node_id}' is declared more than once")]
    DuplicateNode { node_id: String },
    /// Closures are keyed on edge ID, so a shared ID would close every edge
    /// carrying it. Unnamed edges are exempt.
    #[error("edge '{edge_id}' is declared more than once")]
    DuplicateEdge { edge_id: String },
    /// A weight is negative or not a finite number.
    #[error("edge '{edge_id}' has invalid {field} value {value}")]
    InvalidWeight {
        edge_id: String,
        field: WeightField,
        value: f64,
    },
}

fn describe_unknown(unknown: &[UnknownEndpoint]) -> String {
    unknown
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Plan creation failed. No plan, partial or otherwise, is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("graph has no edges to plan against")]
    EmptyGraph,
    /// The first task (in input order) with no path under the plan's constraints.
    #[error(
        "objective '{objective}' is infeasible: no path for task '{task_id}' from '{origin}' to '{destination}'"
    )]
    Infeasible {
        task_id: String,
        objective: Objective,
        origin: String,
        destination: String,
    },
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),
}

impl PlanError {
    /// True for failures the caller must fix in the request itself (an empty
    /// or malformed graph), as opposed to an infeasible task.
    pub fn is_precondition(&self) -> bool {
        matches!(self, PlanError::EmptyGraph | PlanError::Graph(_))
    }

    /// The failing task, if this error names one.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            PlanError::Infeasible { task_id, .. } => Some(task_id),
            _ => None,
        }
    }
}
