//! # Deposit Processor
//!
//! Orchestrates the full workflow over one deposits document: open it,
//! validate it against a schema, load it with a chosen parser strategy,
//! sort, print, and render an HTML report through a stylesheet.
//!
//! ```rust,no_run
//! use deposit_xml::parser::ParserKind;
//! use deposit_xml::processor::{DepositProcessor, SortKey};
//!
//! let mut processor = DepositProcessor::new();
//! processor.set_schema("xml/xsd/deposits.xsd").ok();
//! processor.set_stylesheet("xml/xsl/deposits.xsl").ok();
//! processor.open("xml/deposits.xml").ok();
//!
//! if processor.validate() {
//!     processor.read_deposits(ParserKind::Cursor).ok();
//!     processor.sort_deposits(SortKey::Depositor).ok();
//!     processor.print_deposits();
//!     processor.render_report().ok();
//! }
//! ```
//!
//! Every operation reports its failure through the `log` facade and returns
//! it to the caller; none of them panics or aborts on bad input.

use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{error, info};
use serde::Deserialize;

use crate::deposit::{Deposit, DepositsDb};
use crate::external::{
    SchemaValidator, StyleTransform, ToolError, XmllintValidator, XsltprocTransform,
};
use crate::parser::{ParseError, ParserKind, UnknownSelector};
use crate::writer::{write_deposits_to_file, WriteError};

#[cfg(test)]
mod tests;

/// Default location of the rendered HTML report
pub const DEFAULT_REPORT_PATH: &str = "xml/deposits.html";

/// Which file reference an error concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Input XML document
    Document,
    /// XML Schema
    Schema,
    /// XSLT stylesheet
    Stylesheet,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Document => "xml",
            Self::Schema => "schema",
            Self::Stylesheet => "stylesheet",
        })
    }
}

/// Errors reported by [`DepositProcessor`] operations
#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    /// A referenced file does not exist
    #[error("No {role} file found at {}", path.display())]
    MissingFile {
        /// Which reference
        role: FileRole,
        /// The path that was given
        path: PathBuf,
    },

    /// An operation needs an opened document
    #[error("No xml file opened")]
    NoDocument,

    /// Validation needs a schema
    #[error("No schema is set")]
    NoSchema,

    /// Rendering needs a stylesheet
    #[error("No stylesheet loaded")]
    NoStylesheet,

    /// An operation needs loaded deposits
    #[error("No deposits loaded")]
    NotLoaded,

    /// The document could not be parsed
    #[error("Parse failed: {0}")]
    Parse(#[from] ParseError),

    /// An external tool failed
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The collection could not be written
    #[error("Write failed: {0}")]
    Write(#[from] WriteError),

    /// Printing failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Sort order for loaded deposits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Depositor name, lexicographic
    Depositor,
    /// Amount on deposit, numeric
    Amount,
    /// Time constraint, numeric
    #[serde(rename = "time", alias = "time-constraint")]
    TimeConstraint,
}

impl SortKey {
    /// All sort keys
    pub const ALL: [SortKey; 3] = [
        SortKey::Depositor,
        SortKey::Amount,
        SortKey::TimeConstraint,
    ];

    /// Selector name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Depositor => "depositor",
            Self::Amount => "amount",
            Self::TimeConstraint => "time",
        }
    }

    /// Compare two deposits under this key
    pub fn compare(&self, a: &Deposit, b: &Deposit) -> Ordering {
        match self {
            Self::Depositor => a.depositor.cmp(&b.depositor),
            Self::Amount => a.amount_on_deposit.cmp(&b.amount_on_deposit),
            Self::TimeConstraint => a.time_constraint.cmp(&b.time_constraint),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "depositor" => Ok(Self::Depositor),
            "amount" => Ok(Self::Amount),
            "time" | "time-constraint" => Ok(Self::TimeConstraint),
            _ => Err(UnknownSelector {
                kind: "sort key",
                value: s.to_string(),
                expected: "depositor, amount, time",
            }),
        }
    }
}

/// Stateful driver for one deposits document
pub struct DepositProcessor {
    xml_file: Option<PathBuf>,
    schema_file: Option<PathBuf>,
    stylesheet_file: Option<PathBuf>,
    report_path: PathBuf,
    validator: Box<dyn SchemaValidator>,
    transform: Box<dyn StyleTransform>,
    deposits: Option<DepositsDb>,
}

impl Default for DepositProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DepositProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepositProcessor")
            .field("xml_file", &self.xml_file)
            .field("schema_file", &self.schema_file)
            .field("stylesheet_file", &self.stylesheet_file)
            .field("report_path", &self.report_path)
            .field("deposits", &self.deposits.as_ref().map(DepositsDb::len))
            .finish()
    }
}

impl DepositProcessor {
    /// Create a processor using `xmllint` and `xsltproc`
    pub fn new() -> Self {
        Self {
            xml_file: None,
            schema_file: None,
            stylesheet_file: None,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            validator: Box::new(XmllintValidator::default()),
            transform: Box::new(XsltprocTransform::default()),
            deposits: None,
        }
    }

    /// Replace the schema validator
    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Replace the style transform
    pub fn with_transform(mut self, transform: impl StyleTransform + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    /// Change where [`render_report`](Self::render_report) writes
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    /// Set the XSD file used by [`validate`](Self::validate)
    ///
    /// The reference is kept even if the file does not exist.
    pub fn set_schema(&mut self, path: impl AsRef<Path>) -> Result<(), ProcessorError> {
        self.schema_file = Some(path.as_ref().to_path_buf());
        check_exists(FileRole::Schema, path.as_ref())
    }

    /// Set the XSL file used by [`render_report`](Self::render_report)
    ///
    /// The reference is kept even if the file does not exist.
    pub fn set_stylesheet(&mut self, path: impl AsRef<Path>) -> Result<(), ProcessorError> {
        self.stylesheet_file = Some(path.as_ref().to_path_buf());
        check_exists(FileRole::Stylesheet, path.as_ref())
    }

    /// Select the XML document; nothing is read yet
    ///
    /// The reference is kept even if the file does not exist.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), ProcessorError> {
        self.xml_file = Some(path.as_ref().to_path_buf());
        check_exists(FileRole::Document, path.as_ref())
    }

    /// The opened document, if any
    pub fn xml_file(&self) -> Option<&Path> {
        self.xml_file.as_deref()
    }

    /// The configured schema, if any
    pub fn schema_file(&self) -> Option<&Path> {
        self.schema_file.as_deref()
    }

    /// The configured stylesheet, if any
    pub fn stylesheet_file(&self) -> Option<&Path> {
        self.stylesheet_file.as_deref()
    }

    /// Where the HTML report is written
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Validate the opened document against the schema
    ///
    /// Returns `false` when no document is opened, no schema is set, or
    /// the validator rejects the document.
    pub fn validate(&self) -> bool {
        match self.try_validate() {
            Ok(()) => true,
            Err(e) => {
                error!("Could not validate: {}", e);
                false
            }
        }
    }

    fn try_validate(&self) -> Result<(), ProcessorError> {
        let xml_file = self.xml_file.as_deref().ok_or(ProcessorError::NoDocument)?;
        let schema_file = self.schema_file.as_deref().ok_or(ProcessorError::NoSchema)?;
        self.validator.validate(xml_file, schema_file)?;
        info!("{} is valid against {}", xml_file.display(), schema_file.display());
        Ok(())
    }

    /// Load all deposits from the opened document
    ///
    /// On failure any previously loaded collection is dropped, so stale
    /// records are never mistaken for the current document.
    pub fn read_deposits(&mut self, kind: ParserKind) -> Result<&DepositsDb, ProcessorError> {
        self.deposits = None;
        let xml_file = self
            .xml_file
            .as_deref()
            .ok_or(ProcessorError::NoDocument)
            .map_err(|e| report("read", e))?;

        let db = kind
            .parser()
            .parse(xml_file)
            .map_err(|e| report("read", e.into()))?;
        info!(
            "Loaded {} deposits from {} ({} parser)",
            db.len(),
            xml_file.display(),
            kind
        );
        Ok(&*self.deposits.insert(db))
    }

    /// The loaded deposits, if any
    pub fn deposits(&self) -> Option<&DepositsDb> {
        self.deposits.as_ref()
    }

    /// Hand over the loaded deposits, leaving the processor unloaded
    pub fn take_deposits(&mut self) -> Option<DepositsDb> {
        self.deposits.take()
    }

    /// Stable in-place sort of the loaded deposits
    pub fn sort_deposits(&mut self, key: SortKey) -> Result<(), ProcessorError> {
        let db = self
            .deposits
            .as_mut()
            .ok_or(ProcessorError::NotLoaded)
            .map_err(|e| report("sort", e))?;
        // slice::sort_by is stable, equal keys keep their order
        db.deposits_mut().sort_by(|a, b| key.compare(a, b));
        info!("Sorted {} deposits by {}", db.len(), key);
        Ok(())
    }

    /// Print one line per deposit to standard output
    pub fn print_deposits(&self) {
        let stdout = io::stdout();
        if let Err(e) = self.print_deposits_to(&mut stdout.lock()) {
            error!("Could not print: {}", e);
        }
    }

    /// Print one line per deposit to `out`
    ///
    /// Writes a notice instead when nothing is loaded.
    pub fn print_deposits_to<W: Write>(&self, out: &mut W) -> Result<(), ProcessorError> {
        match &self.deposits {
            Some(db) => {
                for deposit in db {
                    writeln!(out, "{}", deposit)?;
                }
            }
            None => writeln!(out, "Could not print: no deposits loaded.")?,
        }
        Ok(())
    }

    /// Render the opened document to HTML with the stylesheet
    pub fn render_report(&self) -> Result<PathBuf, ProcessorError> {
        let result = self.try_render();
        result.map_err(|e| report("output", e))
    }

    fn try_render(&self) -> Result<PathBuf, ProcessorError> {
        let stylesheet = self
            .stylesheet_file
            .as_deref()
            .ok_or(ProcessorError::NoStylesheet)?;
        let xml_file = self.xml_file.as_deref().ok_or(ProcessorError::NoDocument)?;

        let output = self
            .transform
            .render(xml_file, stylesheet, &self.report_path)?;
        info!("Rendered report to {}", output.display());
        Ok(output)
    }

    /// Write the loaded deposits, in current order, as a new document
    pub fn write_copy(&self, path: impl AsRef<Path>) -> Result<(), ProcessorError> {
        let db = self
            .deposits
            .as_ref()
            .ok_or(ProcessorError::NotLoaded)
            .map_err(|e| report("write", e))?;
        write_deposits_to_file(db, path.as_ref()).map_err(|e| report("write", e.into()))
    }
}

fn check_exists(role: FileRole, path: &Path) -> Result<(), ProcessorError> {
    if path.exists() {
        Ok(())
    } else {
        Err(report(
            "set",
            ProcessorError::MissingFile {
                role,
                path: path.to_path_buf(),
            },
        ))
    }
}

/// Log a failed operation and hand the error back
fn report(operation: &str, err: ProcessorError) -> ProcessorError {
    error!("Could not {}: {}", operation, err);
    err
}
