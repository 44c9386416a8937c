//! Diff mode - Compare the deployed template with the local render.

use anyhow::{Context, Result};
use tracing::info;

use super::{print_warnings, Cli};

pub async fn execute(cli: &Cli) -> Result<()> {
    info!("Diffing stack from {:?}", cli.data_file);

    let outcome = cli
        .reconciler()
        .diff(&cli.data_file)
        .await
        .context("Failed to diff stack")?;
    print_warnings(&outcome.warnings);

    // An empty diff prints nothing: remote and local match.
    print!("{}", outcome.diff);
    Ok(())
}
