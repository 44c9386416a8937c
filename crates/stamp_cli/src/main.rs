//! cfstamp CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: File or parse error
//! - 5: Cannot connect to AWS
//! - 6: Request rejected by CloudFormation

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Mode};
use stamp_data::DataError;
use stamp_stack::{StackError, StackOperation};
use stamp_template::TemplateError;

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const FILE_ERROR: u8 = 4;
    pub const CONNECTION_ERROR: u8 = 5;
    pub const REMOTE_REJECTED: u8 = 6;
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    let result = match cli.mode() {
        Mode::Scaffold(template) => commands::scaffold::execute(&cli, &template),
        Mode::Show => commands::show::execute(&cli),
        Mode::Render => commands::render::execute(&cli),
        Mode::Diff => commands::diff::execute(&cli).await,
        Mode::Create => commands::deploy::execute(&cli, StackOperation::Create).await,
        Mode::Update => commands::deploy::execute(&cli, StackOperation::Update).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Logs go to stderr so `--diff` and `--show` output stays machine-readable.
fn init_logging(cli: &Cli) {
    let default_filter = if cli.verbose {
        "cfstamp=debug,stamp_template=debug,stamp_data=debug,stamp_stack=debug,warn"
    } else if cli.quiet {
        "error"
    } else {
        "cfstamp=info,stamp_data=info,stamp_stack=info,warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }
}

/// Map the typed error at the root of the chain to an exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    for cause in e.chain() {
        if let Some(err) = cause.downcast_ref::<StackError>() {
            return stack_exit_code(err);
        }
        if let Some(err) = cause.downcast_ref::<DataError>() {
            return data_exit_code(err);
        }
        if let Some(err) = cause.downcast_ref::<TemplateError>() {
            return template_exit_code(err);
        }
    }
    ExitCodes::GENERAL_ERROR
}

fn stack_exit_code(err: &StackError) -> u8 {
    match err {
        StackError::Connection { .. } => ExitCodes::CONNECTION_ERROR,
        StackError::Rejected { .. } | StackError::EmptyTemplate(_) => ExitCodes::REMOTE_REJECTED,
        StackError::Data(inner) => data_exit_code(inner),
        StackError::Template(inner) => template_exit_code(inner),
        StackError::Io(_) => ExitCodes::FILE_ERROR,
    }
}

fn data_exit_code(err: &DataError) -> u8 {
    match err {
        DataError::MissingRequiredKeys { .. } | DataError::InvalidStackName { .. } => {
            ExitCodes::VALIDATION_FAILURE
        }
        DataError::AlreadyExists(_) => ExitCodes::INVALID_ARGS,
        DataError::Template(inner) => template_exit_code(inner),
        DataError::NotFound(_)
        | DataError::Parse { .. }
        | DataError::InvalidFormat { .. }
        | DataError::ImportCycle(_)
        | DataError::Json(_)
        | DataError::Io(_) => ExitCodes::FILE_ERROR,
    }
}

fn template_exit_code(err: &TemplateError) -> u8 {
    match err {
        TemplateError::MissingValues(_) => ExitCodes::VALIDATION_FAILURE,
        TemplateError::UnknownPolicy(_) => ExitCodes::INVALID_ARGS,
        TemplateError::Serialize(_) => ExitCodes::GENERAL_ERROR,
        TemplateError::NotFound(_) | TemplateError::InvalidJson(_) | TemplateError::Io(_) => {
            ExitCodes::FILE_ERROR
        }
    }
}
