//! Remote stack service trait.

use std::fmt;

use async_trait::async_trait;

use crate::error::StackResult;

/// Remote calls a reconciler can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackOperation {
    FetchTemplate,
    Create,
    Update,
}

impl StackOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackOperation::FetchTemplate => "fetch-template",
            StackOperation::Create => "create",
            StackOperation::Update => "update",
        }
    }
}

impl fmt::Display for StackOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Orchestration service holding deployed stacks.
#[async_trait]
pub trait StackService: Send + Sync {
    /// Template body currently associated with a deployed stack.
    async fn fetch_template(&self, name: &str, region: &str) -> StackResult<String>;

    /// Create a new stack from `document`, returning the stack id.
    async fn create_stack(&self, name: &str, region: &str, document: &str) -> StackResult<String>;

    /// Update an existing stack with `document`, returning the stack id.
    async fn update_stack(&self, name: &str, region: &str, document: &str) -> StackResult<String>;
}
