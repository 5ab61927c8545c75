use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use deposit_xml::processor::DepositProcessor;

/// Validate a deposits document against an XML Schema
pub fn run(input: PathBuf, schema: PathBuf) -> Result<()> {
    info!("Deposit Validator");
    info!("=================");
    info!("File:   {}", input.display());
    info!("Schema: {}", schema.display());

    let mut processor = DepositProcessor::new();
    processor
        .open(&input)
        .with_context(|| format!("Cannot open {}", input.display()))?;
    processor
        .set_schema(&schema)
        .with_context(|| format!("Cannot use schema {}", schema.display()))?;

    let valid = processor.validate();

    #[cfg(feature = "colorized_output")]
    {
        use console::style;
        if valid {
            println!("{} {}", style("VALID").green().bold(), input.display());
        } else {
            println!("{} {}", style("INVALID").red().bold(), input.display());
        }
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        let verdict = if valid { "VALID" } else { "INVALID" };
        println!("{} {}", verdict, input.display());
    }

    // Exit with error code if validation failed
    if !valid {
        std::process::exit(1);
    }

    Ok(())
}
