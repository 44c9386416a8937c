//! Error types for templates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Template references values missing from the data file: {}", .0.join(", "))]
    MissingValues(Vec<String>),

    #[error("Invalid JSON document")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Failed to serialize JSON document")]
    Serialize(#[source] serde_json::Error),

    #[error("Unknown missing-value policy: {0}")]
    UnknownPolicy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
