use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use tracing::debug;

use crate::grid::Position;
use crate::hazard::{Cost, RiskModel};

/// Steps and accumulated hazard cost of a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Positions from start (inclusive) to goal (inclusive).
    pub steps: Vec<Position>,
    /// Sum of the entry costs of every step after the start.
    pub cost: Cost,
}

/// Find the route with the fewest steps, ignoring hazard weights. The
/// returned cost is still the hazard cost of the chosen steps.
pub fn find_route_bfs(risk: &RiskModel<'_>, start: Position, goal: Position) -> Option<PathResult> {
    let grid = risk.grid();
    if !grid.in_bounds(start) {
        return None;
    }
    if start == goal {
        return Some(PathResult {
            steps: vec![start],
            cost: 0,
        });
    }

    let mut parents: HashMap<Position, Option<Position>> = HashMap::new();
    let mut queue = VecDeque::new();

    parents.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for next in grid.neighbours(current) {
            if parents.contains_key(&next) {
                continue;
            }

            parents.insert(next, Some(current));
            if next == goal {
                let steps = reconstruct_path(&parents, start, goal);
                let cost = route_cost(risk, &steps)?;
                debug!(%start, %goal, visited = parents.len(), cost, "bfs reached goal");
                return Some(PathResult { steps, cost });
            }
            queue.push_back(next);
        }
    }

    debug!(%start, %goal, visited = parents.len(), "bfs exhausted frontier");
    None
}

/// Run Dijkstra's algorithm: the lowest hazard-cost route without a heuristic.
pub fn find_route_dijkstra(
    risk: &RiskModel<'_>,
    start: Position,
    goal: Position,
) -> Option<PathResult> {
    best_first(risk, start, goal, |_, _| 0)
}

/// Run A* search with the Manhattan distance to `goal` as heuristic.
///
/// Every step costs at least the model's base cost (>= 1), so the heuristic
/// never overestimates and the first time the goal is popped its cost is minimal.
pub fn find_route_a_star(
    risk: &RiskModel<'_>,
    start: Position,
    goal: Position,
) -> Option<PathResult> {
    best_first(risk, start, goal, |from, to| from.manhattan_distance(&to) as Cost)
}

fn best_first(
    risk: &RiskModel<'_>,
    start: Position,
    goal: Position,
    heuristic: impl Fn(Position, Position) -> Cost,
) -> Option<PathResult> {
    let grid = risk.grid();
    if !grid.in_bounds(start) {
        return None;
    }
    if start == goal {
        return Some(PathResult {
            steps: vec![start],
            cost: 0,
        });
    }

    let mut g_score: HashMap<Position, Cost> = HashMap::new();
    let mut parents: HashMap<Position, Option<Position>> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;

    g_score.insert(start, 0);
    parents.insert(start, None);
    queue.push(SearchEntry::new(start, 0, heuristic(start, goal)));

    while let Some(entry) = queue.pop() {
        let current_score = match g_score.get(&entry.node) {
            Some(score) if *score < entry.cost => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            debug!(%start, %goal, expanded, cost = current_score, "search reached goal");
            return Some(PathResult {
                steps: reconstruct_path(&parents, start, goal),
                cost: current_score,
            });
        }
        expanded += 1;

        for next in grid.neighbours(entry.node) {
            let Some(step_cost) = risk.risk_cost(next).value() else {
                continue;
            };

            let tentative_g = current_score.saturating_add(step_cost);
            let improves = match g_score.get(&next) {
                Some(known) => tentative_g < *known,
                None => true,
            };
            if improves {
                g_score.insert(next, tentative_g);
                parents.insert(next, Some(entry.node));
                queue.push(SearchEntry::new(next, tentative_g, heuristic(next, goal)));
            }
        }
    }

    debug!(%start, %goal, expanded, "search exhausted frontier");
    None
}

/// Total entry cost of `steps`, skipping the start cell and saturating at
/// [`Cost::MAX`]. `None` if any step is impassable.
pub fn route_cost(risk: &RiskModel<'_>, steps: &[Position]) -> Option<Cost> {
    steps
        .iter()
        .skip(1)
        .try_fold(0, |total: Cost, pos| {
            Some(total.saturating_add(risk.risk_cost(*pos).value()?))
        })
}

fn reconstruct_path(
    parents: &HashMap<Position, Option<Position>>,
    start: Position,
    goal: Position,
) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct SearchEntry {
    node: Position,
    cost: Cost,
    estimate: Cost,
}

impl SearchEntry {
    fn new(node: Position, cost: Cost, heuristic: Cost) -> Self {
        Self {
            node,
            cost,
            estimate: cost.saturating_add(heuristic),
        }
    }
}

impl Ord for SearchEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap pops the lowest estimate, then the
        // smallest position.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

impl PartialOrd for SearchEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
