#![forbid(unsafe_code)]

mod cmd;
mod output;

use beadview_core::config::resolve_config;
use beadview_core::error::ErrorCode;
use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, Reported, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "beadview: dependency graph queries over a beads issue snapshot",
    long_about = None
)]
struct Cli {
    /// Snapshot to read (`-` for stdin). Defaults to the project snapshot.
    #[arg(long, global = true, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Project key stamped on the model (overrides config).
    #[arg(long, global = true)]
    project_key: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Model",
        about = "Build the graph model and summarize it",
        long_about = "Normalize the snapshot into a graph model and report nodes, edges, and discarded dependency records.",
        after_help = "EXAMPLES:\n    # Summarize the project graph\n    beadview model\n\n    # Dump the full model as JSON\n    beadview model --format json"
    )]
    Model(cmd::model::ModelArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show a laid-out subgraph around an issue",
        long_about = "Show the issues within a hop depth of a focus issue, with layout positions. Without a focus the whole graph is laid out.",
        after_help = "EXAMPLES:\n    # Neighbors one hop away\n    beadview view bd-42\n\n    # Two hops, hiding closed issues\n    beadview view bd-42 --depth 2 --hide-closed\n\n    # Whole graph as JSON\n    beadview view --format json"
    )]
    View(cmd::view::ViewArgs),

    #[command(
        next_help_heading = "Read",
        about = "List blocker and dependent levels",
        long_about = "List the issues upstream (blockers) and downstream (dependents) of a focus issue, level by level.",
        after_help = "EXAMPLES:\n    # Direct blockers and dependents\n    beadview path bd-42\n\n    # Walk the whole chain\n    beadview path bd-42 --depth full"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Analyze what transitively blocks an issue",
        long_about = "Collect every transitive blocker of an issue, count open and in-progress blockers, and name the first one that can be worked on now.",
        after_help = "EXAMPLES:\n    # What is holding up bd-42?\n    beadview chain bd-42\n\n    # Emit machine-readable output\n    beadview chain bd-42 --json"
    )]
    Chain(cmd::chain::ChainArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Detect dependency cycles",
        long_about = "Detect cycles among `blocks` dependencies and list their members.",
        after_help = "EXAMPLES:\n    # List cycles\n    beadview cycles\n\n    # Emit machine-readable output\n    beadview cycles --json"
    )]
    Cycles(cmd::cycles::CyclesArgs),
}

impl Cli {
    const fn subcommand_name(&self) -> &'static str {
        match self.command {
            Commands::Model(_) => "model",
            Commands::View(_) => "view",
            Commands::Path(_) => "path",
            Commands::Chain(_) => "chain",
            Commands::Cycles(_) => "cycles",
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_env("BEADVIEW_LOG").unwrap_or_else(|_| {
            EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
                "beadview=debug,info"
            } else {
                "beadview=info,warn"
            })
        })
    };

    let format = env::var("BEADVIEW_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable in every output mode.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = env::current_dir()?;
    let config = match resolve_config(&cwd) {
        Ok(config) => config,
        Err(err) => {
            let mode = resolve_output_mode(cli.format, cli.json, None);
            let err = CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}"));
            render_error(mode, &err)?;
            return Err(Reported.into());
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, config.user.output.as_deref());
    debug!(command = cli.subcommand_name(), ?output, "dispatching");

    let ctx = cmd::prepare(cli.input.as_deref(), cli.project_key, config, output)?;

    match cli.command {
        Commands::Model(ref args) => cmd::model::run_model(args, &ctx),
        Commands::View(ref args) => cmd::view::run_view(args, &ctx),
        Commands::Path(ref args) => cmd::path::run_path(args, &ctx),
        Commands::Chain(ref args) => cmd::chain::run_chain(args, &ctx),
        Commands::Cycles(ref args) => cmd::cycles::run_cycles(args, &ctx),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let fallback_mode = resolve_output_mode(cli.format, cli.json, None);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<Reported>() => ExitCode::FAILURE,
        Err(err) => {
            let err = CliError::from_code(ErrorCode::InternalUnexpected, format!("{err:#}"));
            if render_error(fallback_mode, &err).is_err() {
                eprintln!("error: {}", err.message);
            }
            ExitCode::FAILURE
        }
    }
}
