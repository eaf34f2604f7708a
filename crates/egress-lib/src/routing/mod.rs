//! Route planning over a hazard-weighted grid.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms (BFS, Dijkstra, A*)
//! - [`Planner`] - Binds a grid, a [`RiskModel`] and an algorithm; exposes
//!   [`Planner::find_path`] for a single exit or the best of all exits
//! - [`EvacuationRequest`] / [`plan_evacuation`] - Validated high-level entry point
//!
//! # Strategy Pattern
//!
//! Each algorithm is encapsulated in a [`RoutePlanner`] implementation,
//! selected through [`select_planner`].
//!
//! # Example
//!
//! ```
//! use egress_lib::{Grid, Planner, Position};
//!
//! let grid: Grid = "P . E\n. F .\n. . E".parse()?;
//! let planner = Planner::new(&grid);
//! let route = planner.find_path(Position::new(0, 0), None).expect("reachable");
//! assert_eq!(route.steps.first(), Some(&Position::new(0, 0)));
//! # Ok::<(), egress_lib::Error>(())
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, BfsPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid, Position};
use crate::hazard::{Cost, HazardWeights, RiskModel};

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Breadth-first search (fewest cells, hazard-blind).
    Bfs,
    /// Dijkstra's algorithm (hazard-weighted).
    Dijkstra,
    /// A* search (hazard-weighted, Manhattan heuristic).
    #[default]
    AStar,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Bfs => "bfs",
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(RouteAlgorithm::Bfs),
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown route algorithm '{other}'")),
        }
    }
}

/// A route from a start cell to one exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Exit (or explicit target) the route ends at.
    pub exit: Position,
    /// Positions from start (inclusive) to exit (inclusive).
    pub steps: Vec<Position>,
    /// Total hazard cost; the start cell contributes nothing.
    pub cost: Cost,
}

impl Route {
    /// Number of moves in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// First cell of the route.
    pub fn start(&self) -> Option<Position> {
        self.steps.first().copied()
    }
}

/// Planner bound to a read-only grid snapshot.
pub struct Planner<'g> {
    risk: RiskModel<'g>,
    strategy: Box<dyn RoutePlanner>,
}

impl<'g> Planner<'g> {
    /// A* planner with default hazard weights.
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            risk: RiskModel::new(grid),
            strategy: select_planner(RouteAlgorithm::default()),
        }
    }

    /// Planner with custom hazard weights.
    pub fn with_weights(grid: &'g Grid, weights: HazardWeights) -> Result<Self> {
        Ok(Self {
            risk: RiskModel::with_weights(grid, weights)?,
            strategy: select_planner(RouteAlgorithm::default()),
        })
    }

    /// Switch the search algorithm.
    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.strategy = select_planner(algorithm);
        self
    }

    pub fn algorithm(&self) -> RouteAlgorithm {
        self.strategy.algorithm()
    }

    pub fn grid(&self) -> &'g Grid {
        self.risk.grid()
    }

    pub fn risk_model(&self) -> &RiskModel<'g> {
        &self.risk
    }

    /// Lowest-cost route from `start`.
    ///
    /// With a `target`, only that position is searched. Without one, every
    /// registered exit is searched and the cheapest route is kept; on equal
    /// cost the exit registered first wins. `None` means nothing is reachable.
    pub fn find_path(&self, start: Position, target: Option<Position>) -> Option<Route> {
        if let Some(exit) = target {
            return self.find_path_to(start, exit);
        }

        let mut best: Option<Route> = None;
        for &exit in self.grid().exits() {
            let Some(route) = self.find_path_to(start, exit) else {
                continue;
            };
            let cheaper = match &best {
                Some(current) => route.cost < current.cost,
                None => true,
            };
            if cheaper {
                best = Some(route);
            }
        }

        match &best {
            Some(route) => {
                debug!(%start, exit = %route.exit, cost = route.cost, "best exit selected");
            }
            None => debug!(%start, exits = self.grid().exits().len(), "no exit reachable"),
        }
        best
    }

    /// Lowest-cost route from `start` to the single position `exit`.
    pub fn find_path_to(&self, start: Position, exit: Position) -> Option<Route> {
        if self.grid().cell(exit) != Some(Cell::Exit) {
            warn!(%exit, "search target no longer holds an exit tag");
        }
        self.strategy
            .find_path(&self.risk, start, exit)
            .map(|result| Route {
                exit,
                steps: result.steps,
                cost: result.cost,
            })
    }
}

impl fmt::Debug for Planner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("algorithm", &self.algorithm())
            .field("risk", &self.risk)
            .finish()
    }
}

/// High-level evacuation planning request.
#[derive(Debug, Clone, Default)]
pub struct EvacuationRequest {
    /// Start cell; defaults to the first registered person.
    pub start: Option<Position>,
    /// Restrict the search to one exit.
    pub exit: Option<Position>,
    pub algorithm: RouteAlgorithm,
    pub weights: HazardWeights,
}

impl EvacuationRequest {
    /// Request an A* route from `start` to the best exit.
    pub fn from_start(start: Position) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }
}

/// Planned evacuation returned by [`plan_evacuation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvacuationPlan {
    pub algorithm: RouteAlgorithm,
    pub start: Position,
    pub route: Route,
}

/// Validate a request and plan the evacuation route.
pub fn plan_evacuation(grid: &Grid, request: &EvacuationRequest) -> Result<EvacuationPlan> {
    let start = resolve_start(grid, request.start)?;

    if grid.exits().is_empty() {
        return Err(Error::NoExits);
    }
    if let Some(exit) = request.exit {
        if grid.cell(exit) != Some(Cell::Exit) {
            return Err(Error::NotAnExit { position: exit });
        }
    }

    let planner =
        Planner::with_weights(grid, request.weights.clone())?.with_algorithm(request.algorithm);
    let Some(route) = planner.find_path(start, request.exit) else {
        return Err(Error::RouteNotFound {
            start,
            goal: request
                .exit
                .map(|exit| exit.to_string())
                .unwrap_or_else(|| "any exit".to_string()),
        });
    };

    info!(
        %start,
        exit = %route.exit,
        cost = route.cost,
        hops = route.hop_count(),
        algorithm = %request.algorithm,
        "evacuation route planned"
    );

    Ok(EvacuationPlan {
        algorithm: request.algorithm,
        start,
        route,
    })
}

/// Resolve the start position, falling back to the first registered person.
///
/// The start must be in bounds and walkable.
pub fn resolve_start(grid: &Grid, start: Option<Position>) -> Result<Position> {
    let start = match start {
        Some(start) => start,
        None => grid.people().first().copied().ok_or(Error::NoPeople)?,
    };
    if !grid.is_walkable(start) {
        return Err(Error::StartNotWalkable { position: start });
    }
    Ok(start)
}
