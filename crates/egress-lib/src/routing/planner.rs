//! Route planning strategies.
//!
//! Each search algorithm is wrapped in a [`RoutePlanner`] implementation so
//! the [`Planner`](super::Planner) can switch algorithms without touching the
//! multi-exit orchestration.

use crate::grid::Position;
use crate::hazard::RiskModel;
use crate::path::{find_route_a_star, find_route_bfs, find_route_dijkstra, PathResult};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search from `start` to `goal` under the given hazard model.
    ///
    /// Returns `None` when the goal cannot be reached.
    fn find_path(&self, risk: &RiskModel<'_>, start: Position, goal: Position)
        -> Option<PathResult>;
}

/// Breadth-first planner: fewest cells, hazard cost reported but not minimised.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPlanner;

impl RoutePlanner for BfsPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Bfs
    }

    fn find_path(
        &self,
        risk: &RiskModel<'_>,
        start: Position,
        goal: Position,
    ) -> Option<PathResult> {
        find_route_bfs(risk, start, goal)
    }
}

/// Dijkstra planner: minimal hazard cost, uninformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        risk: &RiskModel<'_>,
        start: Position,
        goal: Position,
    ) -> Option<PathResult> {
        find_route_dijkstra(risk, start, goal)
    }
}

/// A* planner guided by Manhattan distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        risk: &RiskModel<'_>,
        start: Position,
        goal: Position,
    ) -> Option<PathResult> {
        find_route_a_star(risk, start, goal)
    }
}

/// Select the planner implementation for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Bfs => Box::new(BfsPlanner),
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}
