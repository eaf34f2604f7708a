//! Hazard cost model.
//!
//! Converts a cell's tag and its distance to every fire into the cost of
//! stepping onto it. Fire cells are [`TraversalCost::Impassable`]. Penalties
//! from several fires stack additively, so a corridor squeezed between two
//! fires costs more than one running past a single fire.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid, Position};

/// Scalar path cost.
pub type Cost = u64;

/// Default movement cost for entering any walkable cell.
pub const BASE_MOVE_COST: Cost = 1;
/// Extra cost for entering a smoke-filled cell.
pub const SMOKE_PENALTY: Cost = 5;
/// Proximity penalty per fire at Manhattan distance 1, 2 and 3.
pub const FIRE_PROXIMITY_PENALTIES: [Cost; 3] = [20, 10, 4];
/// Fires within this distance of a path cell count towards its exposure.
pub const FIRE_EXPOSURE_RADIUS: usize = 2;

/// Tunable weights of the hazard cost model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardWeights {
    /// Cost of entering any walkable cell.
    pub base_cost: Cost,
    /// Added when the entered cell holds smoke.
    pub smoke_penalty: Cost,
    /// Per-fire penalty indexed by `distance - 1`; fires further away add nothing.
    pub proximity_penalties: Vec<Cost>,
    /// Radius used when counting fire exposure along a route.
    pub exposure_radius: usize,
}

impl Default for HazardWeights {
    fn default() -> Self {
        Self {
            base_cost: BASE_MOVE_COST,
            smoke_penalty: SMOKE_PENALTY,
            proximity_penalties: FIRE_PROXIMITY_PENALTIES.to_vec(),
            exposure_radius: FIRE_EXPOSURE_RADIUS,
        }
    }
}

impl HazardWeights {
    /// Validate the weights.
    ///
    /// The Manhattan heuristic used by A* assumes every step costs at least one,
    /// so a zero base cost is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.base_cost == 0 {
            return Err(Error::InvalidWeights {
                message: "base_cost must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load weights from a JSON file. Missing fields keep their defaults.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let weights: Self = serde_json::from_str(&contents)?;
        weights.validate()?;
        Ok(weights)
    }

    /// Penalty contributed by one fire at Manhattan distance `distance`.
    pub fn proximity_penalty(&self, distance: usize) -> Cost {
        distance
            .checked_sub(1)
            .and_then(|idx| self.proximity_penalties.get(idx))
            .copied()
            .unwrap_or(0)
    }
}

/// Cost of stepping onto a cell.
///
/// Ordered so that every passable cost sorts below [`TraversalCost::Impassable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalCost {
    Passable(Cost),
    Impassable,
}

impl TraversalCost {
    pub fn value(self) -> Option<Cost> {
        match self {
            TraversalCost::Passable(cost) => Some(cost),
            TraversalCost::Impassable => None,
        }
    }

    pub fn is_impassable(self) -> bool {
        matches!(self, TraversalCost::Impassable)
    }
}

/// Hazard cost model bound to one grid snapshot.
///
/// Fire positions are collected once at construction, making each
/// [`RiskModel::risk_cost`] query `O(F)` in the number of fires.
#[derive(Debug, Clone)]
pub struct RiskModel<'g> {
    grid: &'g Grid,
    fires: Vec<Position>,
    weights: HazardWeights,
}

impl<'g> RiskModel<'g> {
    /// Risk model using [`HazardWeights::default`].
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            fires: grid.fire_cells(),
            weights: HazardWeights::default(),
        }
    }

    /// Risk model with custom weights.
    pub fn with_weights(grid: &'g Grid, weights: HazardWeights) -> Result<Self> {
        weights.validate()?;
        Ok(Self {
            grid,
            fires: grid.fire_cells(),
            weights,
        })
    }

    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    pub fn weights(&self) -> &HazardWeights {
        &self.weights
    }

    /// Fire positions captured at construction, in row-major order.
    pub fn fires(&self) -> &[Position] {
        &self.fires
    }

    /// Cost of entering `pos`, saturating at [`Cost::MAX`].
    ///
    /// Out-of-bounds positions are reported as impassable rather than an error:
    /// the search never asks for them since neighbours are bounds-filtered first.
    pub fn risk_cost(&self, pos: Position) -> TraversalCost {
        let Some(cell) = self.grid.cell(pos) else {
            return TraversalCost::Impassable;
        };

        let mut cost = match cell {
            Cell::Fire => return TraversalCost::Impassable,
            Cell::Smoke => self.weights.base_cost.saturating_add(self.weights.smoke_penalty),
            Cell::Empty | Cell::Wall | Cell::Exit | Cell::Person => self.weights.base_cost,
        };

        for fire in &self.fires {
            cost = cost.saturating_add(
                self.weights
                    .proximity_penalty(pos.manhattan_distance(fire)),
            );
        }

        TraversalCost::Passable(cost)
    }

    /// Number of fires within `radius` (Manhattan) of `pos`.
    pub fn fires_within(&self, pos: Position, radius: usize) -> usize {
        self.fires
            .iter()
            .filter(|fire| pos.manhattan_distance(fire) <= radius)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn grid_with_fire(fire: Position) -> Grid {
        let mut grid = Grid::new(8, 8).unwrap();
        grid.add_fire(fire).unwrap();
        grid
    }

    #[test]
    fn fire_cells_are_impassable() {
        let grid = grid_with_fire(pos(3, 3));
        let model = RiskModel::new(&grid);
        assert_eq!(model.risk_cost(pos(3, 3)), TraversalCost::Impassable);
    }

    #[test]
    fn out_of_bounds_is_impassable() {
        let grid = Grid::new(2, 2).unwrap();
        let model = RiskModel::new(&grid);
        assert!(model.risk_cost(pos(2, 0)).is_impassable());
    }

    #[test]
    fn proximity_penalty_by_distance() {
        let grid = grid_with_fire(pos(3, 3));
        let model = RiskModel::new(&grid);

        assert_eq!(model.risk_cost(pos(3, 4)), TraversalCost::Passable(21));
        assert_eq!(model.risk_cost(pos(4, 4)), TraversalCost::Passable(11));
        assert_eq!(model.risk_cost(pos(3, 6)), TraversalCost::Passable(5));
        assert_eq!(model.risk_cost(pos(7, 3)), TraversalCost::Passable(1));
    }

    #[test]
    fn smoke_adds_fixed_penalty() {
        let mut grid = grid_with_fire(pos(0, 0));
        grid.add_smoke(pos(0, 2)).unwrap();
        grid.add_smoke(pos(7, 7)).unwrap();
        let model = RiskModel::new(&grid);

        assert_eq!(model.risk_cost(pos(0, 2)), TraversalCost::Passable(16));
        assert_eq!(model.risk_cost(pos(7, 7)), TraversalCost::Passable(6));
    }

    #[test]
    fn penalties_from_several_fires_stack() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_fire(pos(0, 1)).unwrap();
        grid.add_fire(pos(2, 1)).unwrap();
        let model = RiskModel::new(&grid);

        // Wedged between two fires at distance 1.
        assert_eq!(model.risk_cost(pos(1, 1)), TraversalCost::Passable(41));
        // Distance 2 from both.
        assert_eq!(model.risk_cost(pos(1, 0)), TraversalCost::Passable(21));
    }

    #[test]
    fn passable_costs_sort_below_impassable() {
        assert!(TraversalCost::Passable(Cost::MAX) < TraversalCost::Impassable);
        assert!(TraversalCost::Passable(3) < TraversalCost::Passable(4));
    }

    #[test]
    fn zero_base_cost_is_rejected() {
        let grid = Grid::new(1, 1).unwrap();
        let weights = HazardWeights {
            base_cost: 0,
            ..HazardWeights::default()
        };
        assert!(matches!(
            RiskModel::with_weights(&grid, weights),
            Err(Error::InvalidWeights { .. })
        ));
    }

    #[test]
    fn custom_proximity_table_is_used() {
        let grid = grid_with_fire(pos(0, 0));
        let weights = HazardWeights {
            proximity_penalties: vec![100],
            ..HazardWeights::default()
        };
        let model = RiskModel::with_weights(&grid, weights).unwrap();

        assert_eq!(model.risk_cost(pos(0, 1)), TraversalCost::Passable(101));
        assert_eq!(model.risk_cost(pos(0, 2)), TraversalCost::Passable(1));
    }

    #[test]
    fn extreme_weights_saturate() {
        let mut grid = grid_with_fire(pos(0, 0));
        grid.add_smoke(pos(0, 1)).unwrap();
        let weights = HazardWeights {
            base_cost: Cost::MAX,
            smoke_penalty: Cost::MAX,
            proximity_penalties: vec![Cost::MAX, Cost::MAX],
            ..HazardWeights::default()
        };
        let model = RiskModel::with_weights(&grid, weights).unwrap();

        assert_eq!(model.risk_cost(pos(0, 1)), TraversalCost::Passable(Cost::MAX));
        assert_eq!(model.risk_cost(pos(5, 5)), TraversalCost::Passable(Cost::MAX));
    }

    #[test]
    fn fires_within_counts_each_fire() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_fire(pos(0, 0)).unwrap();
        grid.add_fire(pos(2, 2)).unwrap();
        let model = RiskModel::new(&grid);

        assert_eq!(model.fires_within(pos(1, 1), 2), 2);
        assert_eq!(model.fires_within(pos(0, 2), 2), 2);
        assert_eq!(model.fires_within(pos(0, 1), 2), 1);
        assert_eq!(model.fires_within(pos(0, 1), 1), 1);
    }
}
