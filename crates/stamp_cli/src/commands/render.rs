//! Default mode - Render the template to disk.

use anyhow::Result;
use tracing::info;

use super::{print_warnings, Cli};

pub fn execute(cli: &Cli) -> Result<()> {
    info!("Rendering stack from {:?}", cli.data_file);

    let outcome = cli.reconciler().render(&cli.data_file)?;
    print_warnings(&outcome.warnings);

    println!("✅ Created {}", outcome.path.display());
    Ok(())
}
