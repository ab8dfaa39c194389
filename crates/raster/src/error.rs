use pilot_core::EmptyChart;
use thiserror::Error;

/// Error types for chart export
#[derive(Error, Debug)]
pub enum RasterError {
    /// The project has no tasks
    #[error("No tasks to draw.")]
    NoTasks,

    /// No task has a start date
    #[error("Tasks need start dates to draw Gantt.")]
    NoDatedTasks,

    /// The recorded drawing could not be parsed back as SVG
    #[error("Failed to build chart image: {0}")]
    Svg(#[from] usvg::Error),

    /// The pixel buffer could not be allocated
    #[error("Cannot allocate a {width}x{height} image")]
    Allocation { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("Failed to encode PNG: {message}")]
    Encode { message: String },

    /// Writing the image to disk failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<EmptyChart> for RasterError {
    fn from(empty: EmptyChart) -> Self {
        match empty {
            EmptyChart::NoTasks => RasterError::NoTasks,
            EmptyChart::NoDatedTasks => RasterError::NoDatedTasks,
        }
    }
}

/// Result type alias for export operations
pub type RasterResult<T> = Result<T, RasterError>;
