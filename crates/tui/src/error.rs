//! Error types for the TUI module.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use pilot_core::CoreError;
use pilot_raster::RasterError;

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Failed to initialize or restore the terminal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// Store read, write or lookup failure.
    #[error("Store error: {0}")]
    Store(#[from] CoreError),

    /// PNG export failure.
    #[error("Export failed: {0}")]
    Export(#[from] RasterError),

    /// No store path given and no platform data directory.
    #[error("Cannot determine a data directory; set PILOT_STORE")]
    NoDataDir,

    /// The log file named by PILOT_TUI_LOG could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
