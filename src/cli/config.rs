//! TOML configuration file support.
//!
//! Settings for the `process` command can be kept in a config file instead of
//! being repeated on every invocation. Command-line flags take precedence.
//!
//! ```toml
//! # deposits.toml
//! [processor]
//! schema = "xml/xsd/deposits.xsd"
//! stylesheet = "xml/xsl/deposits.xsl"
//! report = "xml/deposits.html"
//! parser = "cursor"
//! sort = "depositor"
//!
//! [tools]
//! xmllint = "/usr/bin/xmllint"
//! xsltproc = "/usr/bin/xsltproc"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use deposit_xml::parser::ParserKind;
use deposit_xml::processor::SortKey;

/// Root configuration structure for deposit-processor TOML files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Processor settings.
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Configuration for the process command.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessorConfig {
    /// XML Schema used for validation.
    pub schema: Option<PathBuf>,

    /// XSLT stylesheet used for the HTML report.
    pub stylesheet: Option<PathBuf>,

    /// Output path of the HTML report.
    pub report: Option<PathBuf>,

    /// Parser strategy.
    pub parser: Option<ParserKind>,

    /// Sort key applied after loading.
    pub sort: Option<SortKey>,
}

/// Program names or paths of the external tools.
#[derive(Debug, Default, Deserialize)]
pub struct ToolsConfig {
    /// Schema validator program.
    pub xmllint: Option<String>,

    /// Stylesheet processor program.
    pub xsltproc: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
