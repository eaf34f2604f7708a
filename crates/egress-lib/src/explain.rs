//! Exit evaluation and human-readable explanations.
//!
//! Every registered exit is searched independently from the start cell, the
//! resulting route is re-walked to tally hazard exposure, and the cheapest
//! exit is reported as the selected one.

use std::fmt::Write;

use serde::Serialize;
use tracing::debug;

use crate::grid::{Cell, Position};
use crate::hazard::Cost;
use crate::routing::{Planner, Route};

/// Closing sentence of every rendered explanation.
pub const DECISION_RATIONALE: &str = "Chosen exit has lowest combined risk and distance.";

/// Text returned when no exit can be reached.
pub const NO_SAFE_PATH: &str = "No safe path available.";

/// Hazard exposure along the route to one exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExitAnalysis {
    pub exit: Position,
    /// Total hazard cost of the route.
    pub cost: Cost,
    /// Sum over route cells of the fires within the exposure radius. The same
    /// fire is counted once for every nearby cell.
    pub fire_exposure: usize,
    /// Number of smoke cells on the route.
    pub smoke_exposure: usize,
    /// Cells in the route, start and exit included.
    pub path_length: usize,
}

/// Comparison of every reachable exit from one start cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitReport {
    pub start: Position,
    /// Cheapest analysis; the first one wins on equal cost.
    pub selected: Option<ExitAnalysis>,
    /// One entry per reachable exit, in exit registration order.
    pub analyses: Vec<ExitAnalysis>,
}

/// Presentation style for turning an [`ExitReport`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportRenderMode {
    #[default]
    PlainText,
    RichText,
}

/// Search the route to `exit` and measure its exposure.
///
/// Returns `None` when the exit cannot be reached.
pub fn analyze_exit(planner: &Planner<'_>, start: Position, exit: Position) -> Option<ExitAnalysis> {
    let route = planner.find_path(start, Some(exit))?;
    Some(measure_exposure(planner, &route))
}

/// Re-walk an already planned route and tally its exposure.
pub fn measure_exposure(planner: &Planner<'_>, route: &Route) -> ExitAnalysis {
    let grid = planner.grid();
    let risk = planner.risk_model();
    let radius = risk.weights().exposure_radius;

    let mut fire_exposure = 0;
    let mut smoke_exposure = 0;
    for &step in &route.steps {
        if grid.cell(step) == Some(Cell::Smoke) {
            smoke_exposure += 1;
        }
        fire_exposure += risk.fires_within(step, radius);
    }

    ExitAnalysis {
        exit: route.exit,
        cost: route.cost,
        fire_exposure,
        smoke_exposure,
        path_length: route.steps.len(),
    }
}

/// Analyse every registered exit from `start`. Unreachable exits are omitted.
pub fn evaluate_exits(planner: &Planner<'_>, start: Position) -> ExitReport {
    let analyses: Vec<ExitAnalysis> = planner
        .grid()
        .exits()
        .iter()
        .filter_map(|&exit| analyze_exit(planner, start, exit))
        .collect();

    let selected = analyses.iter().min_by_key(|analysis| analysis.cost).copied();

    debug!(
        %start,
        analysed = analyses.len(),
        exits = planner.grid().exits().len(),
        "exit evaluation complete"
    );

    ExitReport {
        start,
        selected,
        analyses,
    }
}

/// Plain-text comparison of every reachable exit from `start`.
pub fn explain(planner: &Planner<'_>, start: Position) -> String {
    evaluate_exits(planner, start).render(ReportRenderMode::PlainText)
}

impl ExitReport {
    /// Render the report using the requested textual mode.
    pub fn render(&self, mode: ReportRenderMode) -> String {
        match mode {
            ReportRenderMode::PlainText => self.render_plain(),
            ReportRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let Some(best) = &self.selected else {
            return NO_SAFE_PATH.to_string();
        };

        let mut buffer = String::new();
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "Selected Exit: {}", best.exit);
        let _ = writeln!(buffer, "Total Risk Cost: {}", best.cost);
        let _ = writeln!(buffer);
        for analysis in &self.analyses {
            let _ = writeln!(
                buffer,
                "Exit {} -> Distance:{} Smoke:{} FireRisk:{}",
                analysis.exit, analysis.path_length, analysis.smoke_exposure, analysis.fire_exposure
            );
        }
        let _ = write!(buffer, "\nDecision: {DECISION_RATIONALE}");
        buffer
    }

    fn render_rich(&self) -> String {
        let Some(best) = &self.selected else {
            return format!("**{NO_SAFE_PATH}**\n");
        };

        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Selected exit** `{}` from `{}` (risk cost {})",
            best.exit, self.start, best.cost
        );
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "| Exit | Cost | Distance | Smoke | Fire risk |");
        let _ = writeln!(buffer, "|------|-----:|---------:|------:|----------:|");
        let selected_row = self.analyses.iter().position(|analysis| analysis == best);
        for (row, analysis) in self.analyses.iter().enumerate() {
            let marker = if Some(row) == selected_row { " ✓" } else { "" };
            let _ = writeln!(
                buffer,
                "| `{}`{} | {} | {} | {} | {} |",
                analysis.exit,
                marker,
                analysis.cost,
                analysis.path_length,
                analysis.smoke_exposure,
                analysis.fire_exposure
            );
        }
        let _ = writeln!(buffer);
        let _ = writeln!(buffer, "_{DECISION_RATIONALE}_");
        buffer
    }
}
