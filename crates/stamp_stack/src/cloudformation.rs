//! AWS CloudFormation implementation of [`StackService`].

use std::error::Error as StdError;
use std::fmt::Debug;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::types::Capability;
use aws_sdk_cloudformation::Client;
use tracing::{debug, info};

use crate::error::{StackError, StackResult};
use crate::service::{StackOperation, StackService};

/// Service error codes that mean the caller could not be authenticated.
const CREDENTIAL_ERROR_CODES: &[&str] = &[
    "InvalidClientTokenId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "UnrecognizedClientException",
    "MissingAuthenticationToken",
];

/// CloudFormation client using the default AWS credential chain.
#[derive(Debug, Clone, Default)]
pub struct CloudFormationService {
    endpoint_url: Option<String>,
    profile: Option<String>,
    capabilities: Vec<String>,
}

impl CloudFormationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send requests to a custom endpoint (e.g. a local emulator).
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Use a named profile from the shared AWS config files.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Capabilities acknowledged on create/update, e.g. `CAPABILITY_IAM`.
    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    async fn client(&self, region: &str) -> Client {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(region.to_string()));
        if let Some(url) = &self.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }

        debug!("Loading AWS configuration for region {}", region);
        let config = loader.load().await;
        Client::new(&config)
    }

    fn capabilities(&self) -> Option<Vec<Capability>> {
        if self.capabilities.is_empty() {
            return None;
        }
        Some(
            self.capabilities
                .iter()
                .map(|c| Capability::from(c.as_str()))
                .collect(),
        )
    }
}

/// Split SDK failures into rejections by the service and everything that
/// kept the request from being answered.
fn classify<E, R>(err: SdkError<E, R>, operation: StackOperation, stack: &str, region: &str) -> StackError
where
    E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    R: Debug,
{
    if let Some(service_err) = err.as_service_error() {
        let code = service_err.code().unwrap_or_default();
        let message = service_err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| service_err.to_string());

        if CREDENTIAL_ERROR_CODES.contains(&code) {
            return StackError::connection(region, format!("{}: {}", code, message));
        }
        return StackError::rejected(operation, stack, message);
    }

    StackError::connection(region, DisplayErrorContext(&err).to_string())
}

#[async_trait]
impl StackService for CloudFormationService {
    async fn fetch_template(&self, name: &str, region: &str) -> StackResult<String> {
        info!("Fetching template for stack {} in {}", name, region);
        let output = self
            .client(region)
            .await
            .get_template()
            .stack_name(name)
            .send()
            .await
            .map_err(|e| classify(e, StackOperation::FetchTemplate, name, region))?;

        output
            .template_body()
            .map(str::to_string)
            .ok_or_else(|| StackError::EmptyTemplate(name.to_string()))
    }

    async fn create_stack(&self, name: &str, region: &str, document: &str) -> StackResult<String> {
        info!("Creating stack {} in {}", name, region);
        let output = self
            .client(region)
            .await
            .create_stack()
            .stack_name(name)
            .template_body(document)
            .set_capabilities(self.capabilities())
            .send()
            .await
            .map_err(|e| classify(e, StackOperation::Create, name, region))?;

        Ok(output.stack_id().unwrap_or(name).to_string())
    }

    async fn update_stack(&self, name: &str, region: &str, document: &str) -> StackResult<String> {
        info!("Updating stack {} in {}", name, region);
        let output = self
            .client(region)
            .await
            .update_stack()
            .stack_name(name)
            .template_body(document)
            .set_capabilities(self.capabilities())
            .send()
            .await
            .map_err(|e| classify(e, StackOperation::Update, name, region))?;

        Ok(output.stack_id().unwrap_or(name).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities_builder() {
        let service = CloudFormationService::new();
        assert!(service.capabilities().is_none());

        let service = service.with_capabilities(vec![
            "CAPABILITY_IAM".to_string(),
            "CAPABILITY_NAMED_IAM".to_string(),
        ]);
        assert_eq!(
            service.capabilities(),
            Some(vec![Capability::CapabilityIam, Capability::CapabilityNamedIam])
        );
    }

    #[test]
    fn test_endpoint_and_profile() {
        let service = CloudFormationService::new()
            .with_endpoint_url("http://localhost:4566")
            .with_profile("sandbox");
        assert_eq!(service.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(service.profile.as_deref(), Some("sandbox"));
    }
}
