//! Plan aggregation: one solve per delivery task, summed into a route plan.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::PlanError;
use crate::model::{
    DeliveryTask, Objective, PlanRequest, PlanStatus, PlanSummary, RoutePlan, TaskRoute,
};
use crate::solver::{Exclusions, ForbiddenEndpoints, SearchGraph, SolvedPath};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanOptions {
    /// Run the graph validator on the inline graph before solving.
    pub validate_graph: bool,
    /// How forbidden nodes treat a task's own origin and destination.
    pub forbidden_endpoints: ForbiddenEndpoints,
    /// Solve tasks on the rayon pool once a request has at least this many.
    /// Zero always solves in parallel.
    pub parallel_threshold: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            validate_graph: true,
            forbidden_endpoints: ForbiddenEndpoints::Reject,
            parallel_threshold: 64,
        }
    }
}

/// Build a route plan for every task in `request`.
///
/// Fails with [`PlanError::EmptyGraph`] before any task is attempted if the
/// graph has no edges, and with [`PlanError::Infeasible`] naming the first
/// task (by input order) that has no path. Either way no plan is returned.
pub fn create_plan(request: PlanRequest, options: PlanOptions) -> Result<RoutePlan, PlanError> {
    let PlanRequest {
        plan_id,
        objective,
        constraints,
        carrier_id,
        tasks,
        graph,
    } = request;

    let objective = objective.unwrap_or_default();
    let weight = objective.weight_field();
    let constraints = constraints.unwrap_or_default();

    if !graph.has_edges() {
        return Err(PlanError::EmptyGraph);
    }
    if options.validate_graph {
        graph.validate()?;
    }
    if let Some(hours) = constraints.max_hours_per_driver {
        warn!(max_hours_per_driver = hours, "driver hour limit is not enforced");
    }

    let exclusions = Exclusions::from_constraints(&constraints, options.forbidden_endpoints);
    let search = SearchGraph::new(&graph, weight, &exclusions);

    let routes = if tasks.len() >= options.parallel_threshold {
        solve_parallel(&search, &tasks, objective)?
    } else {
        solve_sequential(&search, &tasks, objective)?
    };

    let total: f64 = routes.iter().map(|route| route.weight).sum();
    let summary = PlanSummary::for_weight(weight, total);
    let id = plan_id.unwrap_or_else(generate_plan_id);

    info!(
        plan_id = %id,
        objective = %objective,
        tasks = routes.len(),
        total,
        "route plan created"
    );

    Ok(RoutePlan {
        id,
        objective,
        constraints,
        carrier_id,
        task_ids: tasks.into_iter().map(|task| task.id).collect(),
        summary,
        status: PlanStatus::Planned,
        routes,
    })
}

/// Stops at the first infeasible task; later tasks are never solved.
fn solve_sequential(
    search: &SearchGraph<'_>,
    tasks: &[DeliveryTask],
    objective: Objective,
) -> Result<Vec<TaskRoute>, PlanError> {
    tasks
        .iter()
        .map(|task| task_route(task, solve_task(search, task), objective))
        .collect()
}

/// Solves every task on the pool, then walks the results in input order so
/// the outcome and the logged events match sequential solving.
fn solve_parallel(
    search: &SearchGraph<'_>,
    tasks: &[DeliveryTask],
    objective: Objective,
) -> Result<Vec<TaskRoute>, PlanError> {
    let paths: Vec<Option<SolvedPath>> = tasks
        .par_iter()
        .map(|task| solve_task(search, task))
        .collect();
    tasks
        .iter()
        .zip(paths)
        .map(|(task, path)| task_route(task, path, objective))
        .collect()
}

fn solve_task(search: &SearchGraph<'_>, task: &DeliveryTask) -> Option<SolvedPath> {
    search.solve(&task.origin_node_id, &task.destination_node_id)
}

fn task_route(
    task: &DeliveryTask,
    path: Option<SolvedPath>,
    objective: Objective,
) -> Result<TaskRoute, PlanError> {
    match path {
        Some(path) => {
            debug!(
                task_id = %task.id,
                weight = path.weight,
                hops = path.hops(),
                "task solved"
            );
            Ok(TaskRoute {
                task_id: task.id.clone(),
                node_ids: path.nodes,
                edge_ids: path.edges,
                weight: path.weight,
            })
        }
        None => {
            warn!(
                task_id = %task.id,
                origin = %task.origin_node_id,
                destination = %task.destination_node_id,
                objective = %objective,
                "no feasible path for task"
            );
            Err(PlanError::Infeasible {
                task_id: task.id.clone(),
                objective,
                origin: task.origin_node_id.clone(),
                destination: task.destination_node_id.clone(),
            })
        }
    }
}

fn generate_plan_id() -> String {
    format!("plan_{}", Uuid::new_v4().simple())
}
