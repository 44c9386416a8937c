//! Error types for stack reconciliation.

use thiserror::Error;

use crate::service::StackOperation;

/// Result type alias for stack operations.
pub type StackResult<T> = Result<T, StackError>;

/// Errors that can occur while reconciling a stack.
#[derive(Error, Debug)]
pub enum StackError {
    #[error(
        "Error connecting to AWS in region {region}, please ensure that you've exported \
         the AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY environment variables with valid \
         keys that have permission to use CloudFormation: {message}"
    )]
    Connection { region: String, message: String },

    #[error("{operation} rejected for stack {stack}: {message}")]
    Rejected {
        operation: StackOperation,
        stack: String,
        message: String,
    },

    #[error("Stack {0} returned no template body")]
    EmptyTemplate(String),

    #[error(transparent)]
    Data(#[from] stamp_data::DataError),

    #[error(transparent)]
    Template(#[from] stamp_template::TemplateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StackError {
    pub fn rejected(
        operation: StackOperation,
        stack: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Rejected {
            operation,
            stack: stack.into(),
            message: message.into(),
        }
    }

    pub fn connection(region: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            region: region.into(),
            message: message.into(),
        }
    }
}
