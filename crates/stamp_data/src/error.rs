//! Error types for data files.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for data file operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors that can occur while loading or generating data files.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Error loading {} as JSON, please verify that it is valid JSON", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid data file {}: {message}", .path.display())]
    InvalidFormat { path: PathBuf, message: String },

    #[error("{} is missing required keys: {}", .path.display(), .keys.join(", "))]
    MissingRequiredKeys { path: PathBuf, keys: Vec<String> },

    #[error("{}: STACK_NAME '{name}' cannot be used as a file name", .path.display())]
    InvalidStackName { path: PathBuf, name: String },

    #[error("Import cycle detected at {}", .0.display())]
    ImportCycle(PathBuf),

    #[error("Data file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error(transparent)]
    Template(#[from] stamp_template::TemplateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
