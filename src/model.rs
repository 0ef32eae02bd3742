//! Delivery tasks, objectives, constraints, and route plans.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::{Graph, WeightField};

/// Optimisation criterion for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    #[default]
    Shortest,
    Fastest,
    Cheapest,
    /// Alias of `Shortest`; no blending of cost or time.
    Balanced,
}

impl Objective {
    pub fn weight_field(self) -> WeightField {
        match self {
            Objective::Fastest => WeightField::Duration,
            Objective::Cheapest => WeightField::Cost,
            Objective::Shortest | Objective::Balanced => WeightField::Distance,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Objective::Shortest => "shortest",
            Objective::Fastest => "fastest",
            Objective::Cheapest => "cheapest",
            Objective::Balanced => "balanced",
        };
        f.write_str(name)
    }
}

/// Per-request exclusions applied to every task of a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanConstraints {
    #[serde(default)]
    pub closed_edge_ids: Vec<String>,
    #[serde(default)]
    pub forbidden_node_ids: Vec<String>,
    /// Carried through to the plan; not enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hours_per_driver: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Draft,
    Planned,
    Enroute,
    Delivered,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// One origin -> destination pair to route. Window and status ride along
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTask {
    pub id: String,
    pub origin_node_id: String,
    pub destination_node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<DeliveryWindow>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl DeliveryTask {
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin_node_id: origin.into(),
            destination_node_id: destination.into(),
            order_id: None,
            party_id: None,
            window: None,
            status: TaskStatus::Draft,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    #[default]
    Draft,
    Planned,
    Executed,
    Archived,
}

/// Plan totals. Only the field matching the active weight is ever set, and
/// only when its sum is nonzero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl PlanSummary {
    pub fn for_weight(field: WeightField, total: f64) -> Self {
        let mut summary = Self::default();
        if total == 0.0 {
            return summary;
        }
        match field {
            WeightField::Distance => summary.total_distance_km = Some(total),
            WeightField::Duration => summary.total_duration_min = Some(total),
            WeightField::Cost => summary.total_cost = Some(total),
        }
        summary
    }
}

/// The solved path for one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRoute {
    pub task_id: String,
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
    pub weight: f64,
}

/// Input to plan creation. The graph travels inline with the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<Objective>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<PlanConstraints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    pub tasks: Vec<DeliveryTask>,
    pub graph: Graph,
}

impl PlanRequest {
    pub fn new(objective: Objective, tasks: Vec<DeliveryTask>, graph: Graph) -> Self {
        Self {
            plan_id: None,
            objective: Some(objective),
            constraints: None,
            carrier_id: None,
            tasks,
            graph,
        }
    }

    pub fn with_constraints(mut self, constraints: PlanConstraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn with_plan_id(mut self, plan_id: impl Into<String>) -> Self {
        self.plan_id = Some(plan_id.into());
        self
    }

    pub fn with_carrier(mut self, carrier_id: impl Into<String>) -> Self {
        self.carrier_id = Some(carrier_id.into());
        self
    }
}

/// The output of a planning request. Holds task IDs, not task records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    pub id: String,
    pub objective: Objective,
    pub constraints: PlanConstraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_id: Option<String>,
    pub task_ids: Vec<String>,
    pub summary: PlanSummary,
    pub status: PlanStatus,
    #[serde(default)]
    pub routes: Vec<TaskRoute>,
}

impl RoutePlan {
    pub fn route_for(&self, task_id: &str) -> Option<&TaskRoute> {
        self.routes.iter().find(|route| route.task_id == task_id)
    }
}
