//! Create-data-file mode - Generate a data file skeleton from a template.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use stamp_stack::StackReconciler;

use super::Cli;

pub fn execute(cli: &Cli, template: &Path) -> Result<()> {
    info!("Generating data file {:?} from {:?}", cli.data_file, template);

    let scaffold = StackReconciler::scaffold(template, &cli.data_file, cli.force)?;
    let tag_count = scaffold.entries().len() - stamp_data::REQUIRED_KEYS.len();

    println!(
        "✅ Created {} with {} template tag(s)",
        cli.data_file.display(),
        tag_count
    );
    println!();
    println!("Next steps:");
    println!("  Fill in STACK_NAME, STACK_REGION and the tag values, then run:");
    println!("  cfstamp -d {}", cli.data_file.display());
    Ok(())
}
