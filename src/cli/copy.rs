use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use deposit_xml::parser::ParserKind;
use deposit_xml::processor::DepositProcessor;

/// Load a deposits document and write the records back out as XML
pub fn run(input: PathBuf, output: PathBuf, parser: ParserKind) -> Result<()> {
    info!("Input:  {}", input.display());
    info!("Output: {}", output.display());

    let mut processor = DepositProcessor::new();
    processor
        .open(&input)
        .with_context(|| format!("Cannot open {}", input.display()))?;
    let count = processor
        .read_deposits(parser)
        .context("Failed to load deposits")?
        .len();
    processor
        .write_copy(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Copied {} deposits", count);
    Ok(())
}
