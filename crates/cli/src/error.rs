use std::path::PathBuf;
use thiserror::Error;

use pilot_core::CoreError;
use pilot_raster::RasterError;

/// Error types for the pilot CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Store or validation failure
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Chart export failure
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// No store path given and no platform data directory
    #[error("Cannot determine a data directory; pass --store or set PILOT_STORE")]
    NoDataDir,

    /// Error serializing command output
    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    /// Error writing command output
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error for invalid flag values
    #[error("{message}")]
    InvalidArgument { message: String },
}

impl CliError {
    /// The message followed by each underlying cause.
    pub fn full_message(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = cause.source();
        }
        message
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;
