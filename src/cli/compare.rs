use anyhow::Result;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

use deposit_xml::deposit::DepositsDb;
use deposit_xml::parser::{DepositParser, ParserKind};

/// Outcome of one parser strategy
enum Outcome {
    /// Parsed and agrees with the reference strategy
    Agrees(usize),
    /// Parsed but differs from the reference strategy
    Differs(usize),
    /// Parse failed
    Failed(String),
}

/// Per-strategy results for one document
struct Comparison {
    file_path: String,
    results: Vec<(ParserKind, Outcome)>,
}

impl Comparison {
    /// Parse `path` with every strategy and compare against the first success
    fn run(path: &Path) -> Self {
        let mut reference: Option<DepositsDb> = None;
        let mut results = Vec::with_capacity(ParserKind::ALL.len());

        for kind in ParserKind::ALL {
            let outcome = match kind.parser().parse(path) {
                Ok(db) => match &reference {
                    Some(expected) if *expected != db => Outcome::Differs(db.len()),
                    Some(_) => Outcome::Agrees(db.len()),
                    None => {
                        let count = db.len();
                        reference = Some(db);
                        Outcome::Agrees(count)
                    }
                },
                Err(e) => Outcome::Failed(e.to_string()),
            };
            results.push((kind, outcome));
        }

        Self {
            file_path: path.display().to_string(),
            results,
        }
    }

    fn all_agree(&self) -> bool {
        self.results
            .iter()
            .all(|(_, outcome)| matches!(outcome, Outcome::Agrees(_)))
    }

    /// Format the comparison with colors (requires console feature)
    fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::{style, Emoji};

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static DIFF: Emoji<'_, '_> = Emoji("⚠", "[DIFF]");
            static FAIL: Emoji<'_, '_> = Emoji("✗", "[FAIL]");

            let mut output = String::new();
            output.push_str(&format!("{}\n", style("Parser Comparison").bold().cyan()));
            output.push_str(&format!("{}\n", style("=================").cyan()));
            output.push_str(&format!("{}: {}\n\n", style("File").bold(), self.file_path));

            for (kind, outcome) in &self.results {
                match outcome {
                    Outcome::Agrees(count) => output.push_str(&format!(
                        "[{}] {} {} deposits\n",
                        OK,
                        style(format!("{:<8}", kind)).green(),
                        count
                    )),
                    Outcome::Differs(count) => output.push_str(&format!(
                        "[{}] {} {} deposits - {}\n",
                        DIFF,
                        style(format!("{:<8}", kind)).yellow(),
                        count,
                        style("DIFFERS").yellow().bold()
                    )),
                    Outcome::Failed(msg) => output.push_str(&format!(
                        "[{}] {} {}: {}\n",
                        FAIL,
                        style(format!("{:<8}", kind)).red(),
                        style("FAILED").red().bold(),
                        msg
                    )),
                }
            }

            output.push('\n');
            if self.all_agree() {
                output.push_str(&format!("{}\n", style("All parsers agree").green().bold()));
            } else {
                output.push_str(&format!("{}\n", style("Parsers DISAGREE").red().bold()));
            }
            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parser Comparison")?;
        writeln!(f, "=================")?;
        writeln!(f, "File: {}", self.file_path)?;
        writeln!(f)?;

        for (kind, outcome) in &self.results {
            match outcome {
                Outcome::Agrees(count) => writeln!(f, "[OK]   {:<8} {} deposits", kind, count)?,
                Outcome::Differs(count) => {
                    writeln!(f, "[DIFF] {:<8} {} deposits - DIFFERS", kind, count)?
                }
                Outcome::Failed(msg) => writeln!(f, "[FAIL] {:<8} FAILED: {}", kind, msg)?,
            }
        }

        writeln!(f)?;
        if self.all_agree() {
            writeln!(f, "All parsers agree")
        } else {
            writeln!(f, "Parsers DISAGREE")
        }
    }
}

/// Parse a document with every strategy and report whether they agree
pub fn run(input: PathBuf) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    info!("Comparing parser strategies on {}", input.display());
    let comparison = Comparison::run(&input);
    println!("{}", comparison.format_colored());

    // Exit with error code if any strategy failed or disagreed
    if !comparison.all_agree() {
        std::process::exit(1);
    }

    Ok(())
}
