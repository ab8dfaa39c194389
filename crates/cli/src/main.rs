use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use pilot_cli::commands::Command;
use pilot_cli::error::{CliError, CliResult};
use pilot_core::{JsonStore, STORE_FILE_NAME};

/// Environment variable name for the store path
const PILOT_STORE_ENV: &str = "PILOT_STORE";

/// Pilot - project timelines and due-soon notices
#[derive(Parser)]
#[command(name = "pilot")]
#[command(version = "0.1.0")]
#[command(about = "Project timelines and due-soon notices", long_about = None)]
struct Args {
    /// Path to the store file (can also be set via PILOT_STORE env var)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the store path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --store argument
/// 2. PILOT_STORE environment variable (if non-empty)
/// 3. Default path (`<data dir>/pilot/store.json`)
fn resolve_store_path(cli_store: Option<PathBuf>) -> CliResult<PathBuf> {
    if let Some(path) = cli_store {
        return Ok(path);
    }

    if let Ok(env_path) = std::env::var(PILOT_STORE_ENV)
        && !env_path.is_empty()
    {
        return Ok(PathBuf::from(env_path));
    }

    dirs::data_dir()
        .map(|dir| dir.join("pilot").join(STORE_FILE_NAME))
        .ok_or(CliError::NoDataDir)
}

/// Initialize logging from RUST_LOG
///
/// Examples:
/// - `RUST_LOG=debug` - show debug and above
/// - `RUST_LOG=pilot_core=trace` - trace the chart engine only
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> CliResult<()> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> CliResult<()> {
    let store_path = resolve_store_path(args.store.clone())?;
    let store = JsonStore::new(store_path);
    tracing::debug!(path = %store.path().display(), "using store");

    match &args.command {
        Some(cmd) => {
            let result = cmd.execute(&store).await?;
            if !result.is_empty() {
                println!("{}", result);
            }
        }
        None => {
            println!("Welcome to Pilot!");
            println!("Use 'pilot --help' for usage information.");
        }
    }

    Ok(())
}
