//! Reconciler configuration.

use std::path::PathBuf;

use stamp_template::MissingPolicy;

/// Settings shared by every reconciler operation.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Directory rendered documents are written to.
    pub output_dir: PathBuf,
    /// How tags without a data file value are handled.
    pub missing_policy: MissingPolicy,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            missing_policy: MissingPolicy::default(),
        }
    }
}

impl ReconcilerConfig {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn missing_policy(mut self, policy: MissingPolicy) -> Self {
        self.missing_policy = policy;
        self
    }
}
