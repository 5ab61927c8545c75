//! # External Collaborators
//!
//! Schema validation and style-transform rendering are delegated to
//! external tools. Each concern is a small trait so the processor can be
//! driven by any backend; the defaults run `xmllint` and `xsltproc`.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::debug;

/// Errors reported by an external tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The tool could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The tool ran and reported failure
    #[error("{program} failed ({status}): {stderr}")]
    Failed {
        /// Program that was invoked
        program: String,
        /// Exit status
        status: ExitStatus,
        /// Captured standard error, trimmed
        stderr: String,
    },
}

/// Checks a document against an XML Schema
pub trait SchemaValidator {
    /// `Ok(())` if `document` conforms to `schema`
    fn validate(&self, document: &Path, schema: &Path) -> Result<(), ToolError>;
}

/// Renders a document through an XSLT stylesheet
pub trait StyleTransform {
    /// Transform `document` with `stylesheet`, writing to `output`
    ///
    /// Returns the path of the rendered file.
    fn render(&self, document: &Path, stylesheet: &Path, output: &Path)
        -> Result<PathBuf, ToolError>;
}

/// [`SchemaValidator`] backed by `xmllint --schema`
#[derive(Debug, Clone)]
pub struct XmllintValidator {
    program: String,
}

impl XmllintValidator {
    /// Use the given `xmllint` executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured executable
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for XmllintValidator {
    fn default() -> Self {
        Self::new("xmllint")
    }
}

impl SchemaValidator for XmllintValidator {
    fn validate(&self, document: &Path, schema: &Path) -> Result<(), ToolError> {
        let mut command = Command::new(&self.program);
        command
            .arg("--noout")
            .arg("--schema")
            .arg(schema)
            .arg(document);
        run(&self.program, command)
    }
}

/// [`StyleTransform`] backed by `xsltproc`
#[derive(Debug, Clone)]
pub struct XsltprocTransform {
    program: String,
}

impl XsltprocTransform {
    /// Use the given `xsltproc` executable
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The configured executable
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for XsltprocTransform {
    fn default() -> Self {
        Self::new("xsltproc")
    }
}

impl StyleTransform for XsltprocTransform {
    fn render(
        &self,
        document: &Path,
        stylesheet: &Path,
        output: &Path,
    ) -> Result<PathBuf, ToolError> {
        let mut command = Command::new(&self.program);
        command
            .arg("--output")
            .arg(output)
            .arg(stylesheet)
            .arg(document);
        run(&self.program, command)?;
        Ok(output.to_path_buf())
    }
}

fn run(program: &str, mut command: Command) -> Result<(), ToolError> {
    debug!("Running {:?}", command);
    let output = command.output().map_err(|source| ToolError::Spawn {
        program: program.to_string(),
        source,
    })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(ToolError::Failed {
            program: program.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}
