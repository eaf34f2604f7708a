//! Route command handler for planning a single evacuation route.

use std::path::PathBuf;

use anyhow::{Context, Result};

use egress_cli::output::{render_plan_rich, render_plan_text, write_json, OutputFormat};
use egress_lib::{plan_evacuation, EvacuationRequest, Position, RouteAlgorithm};

use super::{load_grid, load_weights};

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Grid layout file.
    pub grid: PathBuf,
    /// Start cell; defaults to the first person in the grid.
    pub from: Option<Position>,
    /// Restrict planning to one exit.
    pub exit: Option<Position>,
    /// Algorithm to use when planning the route.
    pub algorithm: RouteAlgorithm,
    /// Optional hazard weights file.
    pub weights: Option<PathBuf>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> Result<EvacuationRequest> {
        Ok(EvacuationRequest {
            start: self.from,
            exit: self.exit,
            algorithm: self.algorithm,
            weights: load_weights(self.weights.as_deref())?,
        })
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(args: &RouteCommandArgs, format: OutputFormat) -> Result<()> {
    let grid = load_grid(&args.grid)?;
    let request = args.to_request()?;
    let plan = plan_evacuation(&grid, &request).context("failed to plan evacuation route")?;

    match format {
        OutputFormat::Text => println!("{}", render_plan_text(&plan)),
        OutputFormat::Rich => print!("{}", render_plan_rich(&plan)),
        OutputFormat::Json => write_json(&plan).context("failed to write JSON output")?,
    }
    Ok(())
}
