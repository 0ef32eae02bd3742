//! route-planner core
//!
//! Shortest-path routing of delivery tasks over a caller-supplied location
//! graph, aggregated into route plans.

pub mod error;
pub mod graph;
pub mod model;
pub mod planner;
pub mod solver;
pub mod validator;

pub use error::{GraphError, PlanError};
pub use graph::{Edge, Graph, Node, NodeKind, WeightField};
pub use model::{DeliveryTask, Objective, PlanConstraints, PlanRequest, RoutePlan};
pub use planner::{PlanOptions, create_plan};
pub use solver::{Exclusions, ForbiddenEndpoints, SearchGraph, SolvedPath, shortest_path};
pub use validator::{GraphAcceptance, validate_graph};
