//! Explain command handler comparing every exit from a start cell.

use std::path::PathBuf;

use anyhow::{Context, Result};

use egress_cli::output::{render_report, write_json, OutputFormat};
use egress_lib::{evaluate_exits, resolve_start, Planner, Position};

use super::{load_grid, load_weights};

/// Arguments for the explain command.
#[derive(Debug, Clone)]
pub struct ExplainCommandArgs {
    /// Grid layout file.
    pub grid: PathBuf,
    /// Start cell; defaults to the first person in the grid.
    pub from: Option<Position>,
    /// Optional hazard weights file.
    pub weights: Option<PathBuf>,
}

/// Handle the explain subcommand.
pub fn handle_explain_command(args: &ExplainCommandArgs, format: OutputFormat) -> Result<()> {
    let grid = load_grid(&args.grid)?;
    let start = resolve_start(&grid, args.from).context("invalid start position")?;

    let weights = load_weights(args.weights.as_deref())?;
    let planner = Planner::with_weights(&grid, weights)?;
    let report = evaluate_exits(&planner, start);

    match format {
        OutputFormat::Json => write_json(&report).context("failed to write JSON output")?,
        OutputFormat::Text | OutputFormat::Rich => {
            println!("{}", render_report(&report, format));
        }
    }
    Ok(())
}
