//! Output formatting for plans and exit reports.
//!
//! This module renders library results as plain text, markdown-flavoured
//! rich text, or JSON.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use egress_lib::{EvacuationPlan, ExitReport, ReportRenderMode};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Markdown-flavoured text.
    Rich,
    /// Pretty-printed JSON.
    Json,
}

/// Render a planned route in text format.
pub fn render_plan_text(plan: &EvacuationPlan) -> String {
    let route = &plan.route;
    let mut lines = vec![format!(
        "Route from {} to exit {} ({} moves; algorithm: {}):",
        plan.start,
        route.exit,
        route.hop_count(),
        plan.algorithm
    )];
    for (index, step) in route.steps.iter().enumerate() {
        lines.push(format!("{index:>3}: {step}"));
    }
    lines.push(String::new());
    lines.push(format!("Total risk cost: {}", route.cost));
    lines.join("\n")
}

/// Render a planned route in rich text format.
pub fn render_plan_rich(plan: &EvacuationPlan) -> String {
    let route = &plan.route;
    let mut buffer = format!(
        "**Route** `{}` → `{}` ({} moves, algorithm: `{}`, risk cost {})\n",
        plan.start,
        route.exit,
        route.hop_count(),
        plan.algorithm,
        route.cost
    );
    for (index, step) in route.steps.iter().enumerate() {
        buffer.push_str(&format!("* {index:>2}. `{step}`\n"));
    }
    buffer
}

/// Render an exit report using the library renderer.
pub fn render_report(report: &ExitReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Rich => report.render(ReportRenderMode::RichText),
        OutputFormat::Text | OutputFormat::Json => report.render(ReportRenderMode::PlainText),
    }
}

/// Write any serialisable value as pretty JSON to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn write_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use egress_lib::{plan_evacuation, EvacuationRequest, Grid, Position};

    fn plan() -> EvacuationPlan {
        let grid: Grid = "P . E".parse().unwrap();
        plan_evacuation(&grid, &EvacuationRequest::default()).unwrap()
    }

    #[test]
    fn text_plan_lists_steps_and_cost() {
        let text = render_plan_text(&plan());
        assert!(text.starts_with("Route from (0, 0) to exit (0, 2) (2 moves; algorithm: a-star):"));
        assert!(text.contains("  1: (0, 1)"));
        assert!(text.ends_with("Total risk cost: 2"));
    }

    #[test]
    fn rich_plan_uses_markdown_list() {
        let text = render_plan_rich(&plan());
        assert!(text.contains("**Route** `(0, 0)` → `(0, 2)`"));
        assert!(text.contains("*  2. `(0, 2)`"));
    }

    #[test]
    fn report_format_selects_renderer() {
        let grid: Grid = "P . E".parse().unwrap();
        let planner = egress_lib::Planner::new(&grid);
        let report = egress_lib::evaluate_exits(&planner, Position::new(0, 0));

        assert!(render_report(&report, OutputFormat::Text).contains("Selected Exit: (0, 2)"));
        assert!(render_report(&report, OutputFormat::Rich).contains("**Selected exit**"));
    }
}
