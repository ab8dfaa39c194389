//! Entry point for the Pilot TUI application.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use pilot_tui::{App, TuiError, TuiResult};

/// Environment variable naming the log file
const PILOT_TUI_LOG_ENV: &str = "PILOT_TUI_LOG";

/// Send logs to the file named by PILOT_TUI_LOG, filtered by RUST_LOG.
///
/// Without PILOT_TUI_LOG nothing is logged, since output on the terminal
/// would corrupt the screen.
fn init_logging() -> TuiResult<()> {
    let Some(path) = std::env::var_os(PILOT_TUI_LOG_ENV).filter(|p| !p.is_empty()) else {
        return Ok(());
    };
    let path = PathBuf::from(path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| TuiError::LogFile { path, source })?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> TuiResult<()> {
    init_logging()?;
    let store_path = std::env::args_os().nth(1).map(PathBuf::from);
    let mut app = App::new(store_path.as_deref())?;
    app.run().await
}
