//! Show command handler for printing a parsed grid.

use std::path::Path;

use anyhow::Result;

use super::load_grid;

/// Handle the show subcommand.
///
/// Prints the grid followed by its registered exits and people.
pub fn handle_show(grid_path: &Path) -> Result<()> {
    let grid = load_grid(grid_path)?;
    print!("{grid}");
    println!();
    println!("Exits: {}", join_positions(grid.exits()));
    println!("People: {}", join_positions(grid.people()));
    Ok(())
}

fn join_positions(positions: &[egress_lib::Position]) -> String {
    if positions.is_empty() {
        return "none".to_string();
    }
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
