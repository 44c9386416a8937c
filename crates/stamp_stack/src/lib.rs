//! # stamp_stack
//!
//! Render-and-reconcile pipeline for cfstamp.
//!
//! The [`StackReconciler`] loads a data file, renders its template and then
//! either writes the result to disk, diffs it against the template of the
//! deployed stack, or submits it as a stack create/update. The remote side
//! sits behind the [`StackService`] trait so it can be swapped for
//! [`MockStackService`] in tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stamp_stack::{CloudFormationService, ReconcilerConfig, StackReconciler};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = Arc::new(CloudFormationService::new());
//!     let reconciler = StackReconciler::new(service, ReconcilerConfig::default());
//!
//!     let outcome = reconciler.diff("stacks/web_us-west-2.json").await?;
//!     print!("{}", outcome.diff);
//!     Ok(())
//! }
//! ```

pub mod cloudformation;
pub mod config;
pub mod diff;
pub mod error;
pub mod mock;
pub mod reconciler;
pub mod service;

pub use cloudformation::CloudFormationService;
pub use config::ReconcilerConfig;
pub use diff::unified_diff;
pub use error::{StackError, StackResult};
pub use mock::{CapturedCall, MockFailure, MockStackService};
pub use reconciler::{
    DeployOutcome, DiffOutcome, PreparedStack, RenderOutcome, ShowOutcome, StackReconciler,
};
pub use service::{StackOperation, StackService};
