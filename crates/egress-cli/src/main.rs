use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use egress_cli::output::OutputFormat;
use egress_lib::{Position, RouteAlgorithm};

mod commands;

use commands::explain::{handle_explain_command, ExplainCommandArgs};
use commands::route::{handle_route_command, RouteCommandArgs};
use commands::show::handle_show;

#[derive(Parser, Debug)]
#[command(author, version, about = "Hazard-aware fire evacuation planner")]
struct Cli {
    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a grid layout with its exits and people.
    Show {
        /// Grid layout file (text layout, or JSON when the extension is .json).
        #[arg(long)]
        grid: PathBuf,
    },
    /// Plan the lowest-risk route from a person to an exit.
    Route {
        /// Grid layout file (text layout, or JSON when the extension is .json).
        #[arg(long)]
        grid: PathBuf,
        /// Start cell as ROW,COL. Defaults to the first person in the grid.
        #[arg(long = "from", value_parser = parse_position)]
        from: Option<Position>,
        /// Only consider this exit (ROW,COL).
        #[arg(long = "exit", value_parser = parse_position)]
        exit: Option<Position>,
        /// Search algorithm.
        #[arg(long, default_value = "a-star", value_parser = parse_algorithm)]
        algorithm: RouteAlgorithm,
        /// JSON file overriding the hazard weights.
        #[arg(long)]
        weights: Option<PathBuf>,
    },
    /// Compare every exit and explain which one is chosen.
    Explain {
        /// Grid layout file (text layout, or JSON when the extension is .json).
        #[arg(long)]
        grid: PathBuf,
        /// Start cell as ROW,COL. Defaults to the first person in the grid.
        #[arg(long = "from", value_parser = parse_position)]
        from: Option<Position>,
        /// JSON file overriding the hazard weights.
        #[arg(long)]
        weights: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Show { grid } => handle_show(&grid),
        Command::Route {
            grid,
            from,
            exit,
            algorithm,
            weights,
        } => {
            let args = RouteCommandArgs {
                grid,
                from,
                exit,
                algorithm,
                weights,
            };
            handle_route_command(&args, cli.format)
        }
        Command::Explain {
            grid,
            from,
            weights,
        } => {
            let args = ExplainCommandArgs {
                grid,
                from,
                weights,
            };
            handle_explain_command(&args, cli.format)
        }
    }
}

fn parse_position(value: &str) -> std::result::Result<Position, String> {
    value.parse()
}

fn parse_algorithm(value: &str) -> std::result::Result<RouteAlgorithm, String> {
    value.parse()
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
