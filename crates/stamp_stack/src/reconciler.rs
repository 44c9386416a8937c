//! Render, diff and deploy orchestration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use stamp_data::{DataFile, DataFileScaffold, DataFileValidator, DataError, CF_TEMPLATE};
use stamp_template::{DocumentNormalizer, TemplateRenderer};

use crate::config::ReconcilerConfig;
use crate::diff::unified_diff;
use crate::error::StackResult;
use crate::service::{StackOperation, StackService};

/// A validated data file together with its rendered template.
#[derive(Debug, Clone)]
pub struct PreparedStack {
    pub data: DataFile,
    pub warnings: Vec<String>,
    pub document: String,
}

/// Result of rendering to disk.
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub path: PathBuf,
    pub warnings: Vec<String>,
}

/// Result of comparing the deployed template with the local render.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub diff: String,
    pub warnings: Vec<String>,
}

impl DiffOutcome {
    /// True when remote and local documents are structurally identical.
    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }
}

/// Result of a stack create or update.
#[derive(Debug, Clone)]
pub struct DeployOutcome {
    pub operation: StackOperation,
    pub stack_name: String,
    pub stack_id: String,
    pub warnings: Vec<String>,
}

/// The merged substitution context of a data file.
#[derive(Debug, Clone)]
pub struct ShowOutcome {
    pub json: String,
    pub warnings: Vec<String>,
}

/// Drives one reconciliation operation for a data file.
pub struct StackReconciler {
    service: Arc<dyn StackService>,
    config: ReconcilerConfig,
    renderer: TemplateRenderer,
}

impl StackReconciler {
    pub fn new(service: Arc<dyn StackService>, config: ReconcilerConfig) -> Self {
        let renderer = TemplateRenderer::new().with_missing_policy(config.missing_policy);
        Self {
            service,
            config,
            renderer,
        }
    }

    /// Load and validate a data file, then render the template it names.
    pub fn prepare(&self, data_file: impl AsRef<Path>) -> StackResult<PreparedStack> {
        let (data, report) = DataFileValidator::load(data_file.as_ref())?;

        let template = data.template_path().ok_or_else(|| DataError::MissingRequiredKeys {
            path: data.path().to_path_buf(),
            keys: vec![CF_TEMPLATE.to_string()],
        })?;
        let document = self.renderer.render_file(&template, data.values())?;

        Ok(PreparedStack {
            data,
            warnings: report.warnings,
            document,
        })
    }

    /// Render the template and write it to `<output_dir>/<STACK_NAME>.json`.
    ///
    /// The raw render is written, not the normalized form.
    pub fn render(&self, data_file: impl AsRef<Path>) -> StackResult<RenderOutcome> {
        let prepared = self.prepare(data_file)?;

        if let Err(e) = serde_json::from_str::<serde_json::Value>(&prepared.document) {
            warn!(
                "Rendered template for {} is not valid JSON: {}",
                prepared.data.stack_name(),
                e
            );
        }

        fs::create_dir_all(&self.config.output_dir)?;
        let path = self
            .config
            .output_dir
            .join(format!("{}.json", prepared.data.stack_name()));
        fs::write(&path, &prepared.document)?;

        info!("Created {:?}", path);
        Ok(RenderOutcome {
            path,
            warnings: prepared.warnings,
        })
    }

    /// Diff the deployed template against the local render.
    ///
    /// Both sides are normalized first, so key order and whitespace never
    /// show up as differences.
    pub async fn diff(&self, data_file: impl AsRef<Path>) -> StackResult<DiffOutcome> {
        let prepared = self.prepare(data_file)?;
        let local = DocumentNormalizer::normalize(&prepared.document)?;

        let remote = self
            .service
            .fetch_template(prepared.data.stack_name(), prepared.data.stack_region())
            .await?;
        let remote = DocumentNormalizer::normalize(&remote)?;

        let diff = unified_diff(&remote, &local);
        if diff.is_empty() {
            info!("No differences for stack {}", prepared.data.stack_name());
        } else {
            debug!("Diff for stack {} is {} bytes", prepared.data.stack_name(), diff.len());
        }

        Ok(DiffOutcome {
            diff,
            warnings: prepared.warnings,
        })
    }

    /// Submit the rendered template as a new stack.
    pub async fn create(&self, data_file: impl AsRef<Path>) -> StackResult<DeployOutcome> {
        let prepared = self.prepare(data_file)?;
        let stack_id = self
            .service
            .create_stack(
                prepared.data.stack_name(),
                prepared.data.stack_region(),
                &prepared.document,
            )
            .await?;
        Ok(Self::deployed(StackOperation::Create, prepared, stack_id))
    }

    /// Submit the rendered template as an update to an existing stack.
    pub async fn update(&self, data_file: impl AsRef<Path>) -> StackResult<DeployOutcome> {
        let prepared = self.prepare(data_file)?;
        let stack_id = self
            .service
            .update_stack(
                prepared.data.stack_name(),
                prepared.data.stack_region(),
                &prepared.document,
            )
            .await?;
        Ok(Self::deployed(StackOperation::Update, prepared, stack_id))
    }

    fn deployed(operation: StackOperation, prepared: PreparedStack, stack_id: String) -> DeployOutcome {
        let stack_name = prepared.data.stack_name().to_string();
        info!("Submitted {} for stack {} ({})", operation, stack_name, stack_id);
        DeployOutcome {
            operation,
            stack_name,
            stack_id,
            warnings: prepared.warnings,
        }
    }

    /// Validate a data file and return its merged values as normalized JSON.
    pub fn show(&self, data_file: impl AsRef<Path>) -> StackResult<ShowOutcome> {
        let (data, report) = DataFileValidator::load(data_file.as_ref())?;
        Ok(ShowOutcome {
            json: DocumentNormalizer::normalize_value(&data.to_json())?,
            warnings: report.warnings,
        })
    }

    /// Write a data file skeleton for `template` to `outfile`.
    pub fn scaffold(template: &Path, outfile: &Path, force: bool) -> StackResult<DataFileScaffold> {
        Ok(DataFileScaffold::generate(template, outfile, force)?)
    }
}
