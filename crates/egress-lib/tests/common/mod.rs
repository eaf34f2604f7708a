//! Common test utilities and fixture helpers.
//!
//! Shared grid fixtures plus an independent cost oracle used to check the
//! planner's optimality.

use std::collections::HashMap;
use std::path::PathBuf;

use egress_lib::{Cost, Grid, Position, RiskModel};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn pos(row: usize, col: usize) -> Position {
    Position::new(row, col)
}

/// 4×4 floor with one fire in the upper-left quadrant and exits at the
/// top-right and bottom-left corners. The person stands bottom-right.
#[allow(dead_code)]
pub fn single_fire_floor() -> Grid {
    let mut grid = Grid::new(4, 4).expect("valid dimensions");
    grid.add_fire(pos(1, 1)).expect("in bounds");
    grid.add_exit(pos(0, 3)).expect("in bounds");
    grid.add_exit(pos(3, 0)).expect("in bounds");
    grid.add_person(pos(3, 3)).expect("in bounds");
    grid
}

/// 8×8 office floor with a two-cell fire near the centre and a smoky cell
/// above it.
#[allow(dead_code)]
pub fn office_floor() -> Grid {
    Grid::from_path(&fixtures_dir().join("office_fire.txt")).expect("fixture loads")
}

/// Minimum route cost found by repeatedly relaxing every reached cell until
/// nothing improves. Deliberately independent of the planner's search code.
#[allow(dead_code)]
pub fn brute_force_cost(risk: &RiskModel<'_>, start: Position, goal: Position) -> Option<Cost> {
    let grid = risk.grid();
    if !grid.in_bounds(start) {
        return None;
    }

    let mut best: HashMap<Position, Cost> = HashMap::new();
    best.insert(start, 0);
    loop {
        let mut changed = false;
        let reached: Vec<(Position, Cost)> = best.iter().map(|(p, c)| (*p, *c)).collect();
        for (node, cost) in reached {
            for next in grid.neighbours(node) {
                let Some(step) = risk.risk_cost(next).value() else {
                    continue;
                };
                let candidate = cost + step;
                if best.get(&next).map_or(true, |known| candidate < *known) {
                    best.insert(next, candidate);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    best.get(&goal).copied()
}

/// Assert that consecutive steps are 4-connected.
#[allow(dead_code)]
pub fn assert_contiguous(steps: &[Position]) {
    for pair in steps.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(&pair[1]),
            1,
            "steps {} and {} are not adjacent",
            pair[0],
            pair[1]
        );
    }
}
