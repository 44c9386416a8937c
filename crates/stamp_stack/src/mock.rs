//! Mock stack service for testing.
//!
//! Holds remote templates in memory, records every call, and can be told to
//! fail the way a real service would, so reconciler behavior can be checked
//! without AWS credentials or network access.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{StackError, StackResult};
use crate::service::{StackOperation, StackService};

/// Failure the mock should return instead of succeeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockFailure {
    Connection(String),
    Rejected(String),
}

/// Captured call information for verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedCall {
    pub operation: StackOperation,
    pub name: String,
    pub region: String,
    pub document: Option<String>,
}

/// Mock stack service for testing.
#[derive(Clone, Default)]
pub struct MockStackService {
    /// Deployed templates keyed by (stack name, region).
    templates: Arc<RwLock<HashMap<(String, String), String>>>,
    /// Captured calls for verification.
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Simulated failure to return.
    simulate_failure: Arc<RwLock<Option<MockFailure>>>,
}

impl MockStackService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a deployed stack and its template.
    pub fn with_stack(
        self,
        name: impl Into<String>,
        region: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.templates
            .write()
            .insert((name.into(), region.into()), template.into());
        self
    }

    /// Set a failure to simulate.
    pub fn simulate_failure(self, failure: MockFailure) -> Self {
        *self.simulate_failure.write() = Some(failure);
        self
    }

    /// Current template of a stack, if it exists.
    pub fn template(&self, name: &str, region: &str) -> Option<String> {
        self.templates
            .read()
            .get(&(name.to_string(), region.to_string()))
            .cloned()
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Check if a specific operation was called.
    pub fn was_called(&self, operation: StackOperation) -> bool {
        self.captured_calls
            .read()
            .iter()
            .any(|c| c.operation == operation)
    }

    fn record_call(&self, operation: StackOperation, name: &str, region: &str, document: Option<&str>) {
        self.captured_calls.write().push(CapturedCall {
            operation,
            name: name.to_string(),
            region: region.to_string(),
            document: document.map(str::to_string),
        });
    }

    fn check_failure(&self, operation: StackOperation, name: &str, region: &str) -> StackResult<()> {
        match self.simulate_failure.read().clone() {
            Some(MockFailure::Connection(msg)) => Err(StackError::connection(region, msg)),
            Some(MockFailure::Rejected(msg)) => Err(StackError::rejected(operation, name, msg)),
            None => Ok(()),
        }
    }

    fn stack_id(name: &str, region: &str) -> String {
        format!("arn:aws:cloudformation:{}:000000000000:stack/{}/mock", region, name)
    }
}

#[async_trait]
impl StackService for MockStackService {
    async fn fetch_template(&self, name: &str, region: &str) -> StackResult<String> {
        self.record_call(StackOperation::FetchTemplate, name, region, None);
        self.check_failure(StackOperation::FetchTemplate, name, region)?;

        self.template(name, region).ok_or_else(|| {
            StackError::rejected(
                StackOperation::FetchTemplate,
                name,
                format!("Stack with id {} does not exist", name),
            )
        })
    }

    async fn create_stack(&self, name: &str, region: &str, document: &str) -> StackResult<String> {
        self.record_call(StackOperation::Create, name, region, Some(document));
        self.check_failure(StackOperation::Create, name, region)?;

        let key = (name.to_string(), region.to_string());
        if self.templates.read().contains_key(&key) {
            return Err(StackError::rejected(
                StackOperation::Create,
                name,
                format!("Stack [{}] already exists", name),
            ));
        }
        self.templates.write().insert(key, document.to_string());
        Ok(Self::stack_id(name, region))
    }

    async fn update_stack(&self, name: &str, region: &str, document: &str) -> StackResult<String> {
        self.record_call(StackOperation::Update, name, region, Some(document));
        self.check_failure(StackOperation::Update, name, region)?;

        let key = (name.to_string(), region.to_string());
        let current = self.templates.read().get(&key).cloned();
        match current {
            None => Err(StackError::rejected(
                StackOperation::Update,
                name,
                format!("Stack [{}] does not exist", name),
            )),
            Some(current) if current == document => Err(StackError::rejected(
                StackOperation::Update,
                name,
                "No updates are to be performed.",
            )),
            Some(_) => {
                self.templates.write().insert(key, document.to_string());
                Ok(Self::stack_id(name, region))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_update() {
        let mock = MockStackService::new();

        let id = mock.create_stack("Web", "us-west-2", "{}").await.unwrap();
        assert!(id.contains("stack/Web"));
        assert_eq!(mock.template("Web", "us-west-2").as_deref(), Some("{}"));

        mock.update_stack("Web", "us-west-2", "{\"a\": 1}").await.unwrap();
        assert_eq!(mock.call_count(), 2);
        assert!(mock.was_called(StackOperation::Update));
    }

    #[tokio::test]
    async fn test_noop_update_is_rejected() {
        let mock = MockStackService::new().with_stack("Web", "us-west-2", "{}");

        let err = mock.update_stack("Web", "us-west-2", "{}").await.unwrap_err();
        assert!(err.to_string().contains("No updates are to be performed."));
    }

    #[tokio::test]
    async fn test_region_is_part_of_identity() {
        let mock = MockStackService::new().with_stack("Web", "us-west-2", "{}");

        assert!(mock.fetch_template("Web", "eu-west-1").await.is_err());
        assert!(mock.fetch_template("Web", "us-west-2").await.is_ok());
    }

    #[tokio::test]
    async fn test_simulated_connection_failure() {
        let mock = MockStackService::new()
            .with_stack("Web", "us-west-2", "{}")
            .simulate_failure(MockFailure::Connection("no credentials".to_string()));

        let err = mock.fetch_template("Web", "us-west-2").await.unwrap_err();
        assert!(matches!(err, StackError::Connection { .. }));
        assert_eq!(mock.call_count(), 1);
    }
}
