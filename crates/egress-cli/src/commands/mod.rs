// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments and
// dispatches to these handlers.

pub mod explain;
pub mod route;
pub mod show;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use egress_lib::{Grid, HazardWeights};

/// Load a grid layout (text or JSON) from disk.
pub fn load_grid(path: &Path) -> Result<Grid> {
    let grid = Grid::from_path(path)
        .with_context(|| format!("failed to load grid from {}", path.display()))?;
    debug!(
        path = %path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        exits = grid.exits().len(),
        people = grid.people().len(),
        "grid loaded"
    );
    Ok(grid)
}

/// Load hazard weights from `path`, or the defaults when no file is given.
pub fn load_weights(path: Option<&Path>) -> Result<HazardWeights> {
    match path {
        Some(path) => HazardWeights::from_path(path)
            .with_context(|| format!("failed to load hazard weights from {}", path.display())),
        None => Ok(HazardWeights::default()),
    }
}
