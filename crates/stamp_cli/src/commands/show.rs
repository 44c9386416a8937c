//! Show mode - Print the merged data file values.

use anyhow::Result;

use super::{print_warnings, Cli};

pub fn execute(cli: &Cli) -> Result<()> {
    let outcome = cli.reconciler().show(&cli.data_file)?;
    print_warnings(&outcome.warnings);

    println!("{}", outcome.json);
    Ok(())
}
