use std::path::PathBuf;
use thiserror::Error;

/// Error types for the Pilot core
#[derive(Error, Debug)]
pub enum CoreError {
    /// A calendar date field did not match `YYYY-MM-DD`
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// A time-of-day field did not match `HH:MM`
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    /// Error for invalid input or validation failure
    #[error("{message}")]
    ValidationError { message: String },

    /// Error reading the store file
    #[error("Failed to read store at {path}: {source}")]
    ReadStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error writing the store file
    #[error("Failed to write store at {path}: {source}")]
    WriteStore {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a valid document
    #[error("Malformed store at {path}: {source}")]
    ParseStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The store could not be serialized
    #[error("Failed to encode store: {source}")]
    EncodeStore {
        #[source]
        source: serde_json::Error,
    },

    /// Error when a requested project was not found
    #[error("Project '{project}' not found")]
    ProjectNotFound { project: String },
}

impl CoreError {
    /// Shorthand for a validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::ValidationError {
            message: message.into(),
        }
    }
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
