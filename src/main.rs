//! # deposit-processor
//!
//! Command-line front end for loading, validating, sorting and reporting
//! bank deposit records.
//!
//! ## Usage
//!
//! ```bash
//! # Validate, load with the cursor parser, sort by amount and render the report
//! deposit-processor process xml/deposits.xml -p cursor -s amount \
//!     --schema xml/xsd/deposits.xsd --stylesheet xml/xsl/deposits.xsl
//!
//! # Check that all three parsers agree on a document
//! deposit-processor compare xml/deposits.xml
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
