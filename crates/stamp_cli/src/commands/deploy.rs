//! Create/update modes - Submit the local render to CloudFormation.

use anyhow::{Context, Result};
use tracing::info;

use stamp_stack::StackOperation;

use super::{print_warnings, Cli};

pub async fn execute(cli: &Cli, operation: StackOperation) -> Result<()> {
    info!("Running {} for {:?}", operation, cli.data_file);

    let reconciler = cli.reconciler();
    let outcome = match operation {
        StackOperation::Create => reconciler.create(&cli.data_file).await,
        StackOperation::Update => reconciler.update(&cli.data_file).await,
        StackOperation::FetchTemplate => anyhow::bail!("{} is not a deploy operation", operation),
    }
    .with_context(|| format!("Failed to {} stack", operation))?;
    print_warnings(&outcome.warnings);

    println!(
        "✅ {} submitted for stack '{}'",
        capitalize(outcome.operation.as_str()),
        outcome.stack_name
    );
    println!("Stack ID: {}", outcome.stack_id);
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
