//! CLI argument definitions.
//!
//! cfstamp performs exactly one operation per invocation. The operation is
//! picked by at most one mode flag; without one, the template is rendered
//! to `<STACK_NAME>.json`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{ArgGroup, Parser};

use stamp_stack::{CloudFormationService, ReconcilerConfig, StackReconciler};
use stamp_template::MissingPolicy;

pub mod deploy;
pub mod diff;
pub mod render;
pub mod scaffold;
pub mod show;

/// cfstamp - render CloudFormation templates from data files
#[derive(Parser)]
#[command(name = "cfstamp")]
#[command(version, about = "cfstamp - render CloudFormation templates from data files")]
#[command(long_about = r#"
cfstamp fills the {{ placeholder }} tags of a CloudFormation template with
values from a JSON data file, then writes, diffs, or deploys the result.

MODES:
  (default)               → Render the template to <STACK_NAME>.json
  -c, --create-data-file  → Generate an empty data file from a template's tags
  --diff                  → Diff the deployed template against the local render
  --create                → Create the stack from the local render
  --update                → Update the stack from the local render
  --show                  → Print the merged data file values

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - File or parse error
  5 - Cannot connect to AWS
  6 - Request rejected by CloudFormation
"#)]
#[command(group(
    ArgGroup::new("mode")
        .args(["template", "diff", "create", "update", "show"])
        .multiple(false)
))]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// JSON data file containing the stack definition
    /// (the output file when used with -c)
    #[arg(short = 'd', long = "data-file", env = "CFSTAMP_DATA_FILE", value_name = "PATH")]
    pub data_file: PathBuf,

    /// Generate an empty data file from the tags in an existing template
    #[arg(short = 'c', long = "create-data-file", value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Print the unified diff of the deployed template vs. the local render
    #[arg(long)]
    pub diff: bool,

    /// Directly create the CloudFormation stack described by -d
    #[arg(long)]
    pub create: bool,

    /// Directly update the CloudFormation stack described by -d
    #[arg(long)]
    pub update: bool,

    /// Print the data file values after imports are merged
    #[arg(long)]
    pub show: bool,

    /// What to do with template tags that have no value (error, keep, empty)
    #[arg(long, value_name = "POLICY", default_value = "error")]
    pub on_missing: MissingPolicy,

    /// Directory the rendered template is written to
    #[arg(short, long, env = "CFSTAMP_OUTPUT_DIR", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Overwrite an existing data file when using -c
    #[arg(long, requires = "template")]
    pub force: bool,

    /// Custom CloudFormation endpoint (e.g. a local emulator)
    #[arg(long, env = "CFSTAMP_ENDPOINT_URL", value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Named profile from the shared AWS config files
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Capability to acknowledge on create/update (repeatable), e.g. CAPABILITY_IAM
    #[arg(long = "capability", value_name = "CAPABILITY")]
    pub capabilities: Vec<String>,
}

/// The single operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Render,
    Scaffold(PathBuf),
    Diff,
    Create,
    Update,
    Show,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if let Some(template) = &self.template {
            Mode::Scaffold(template.clone())
        } else if self.diff {
            Mode::Diff
        } else if self.create {
            Mode::Create
        } else if self.update {
            Mode::Update
        } else if self.show {
            Mode::Show
        } else {
            Mode::Render
        }
    }

    /// Reconciler wired to CloudFormation with the command-line settings.
    pub fn reconciler(&self) -> StackReconciler {
        let mut service =
            CloudFormationService::new().with_capabilities(self.capabilities.clone());
        if let Some(url) = &self.endpoint_url {
            service = service.with_endpoint_url(url);
        }
        if let Some(profile) = &self.profile {
            service = service.with_profile(profile);
        }

        let config = ReconcilerConfig::default()
            .output_dir(&self.output_dir)
            .missing_policy(self.on_missing);

        StackReconciler::new(Arc::new(service), config)
    }
}

/// Print non-fatal data file findings.
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("⚠️  WARNING: {}", warning);
    }
}
