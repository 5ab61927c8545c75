//! # Deposit Parsers
//!
//! Three interchangeable strategies that turn a deposits XML document into a
//! [`DepositsDb`]:
//!
//! - [`TreeParser`]: loads the whole document into a namespace-aware tree
//!   (`roxmltree`) and reads fields by random access
//! - [`CallbackParser`]: a push-style [`EventDriver`] feeds element and text
//!   events to a [`ContentHandler`]
//! - [`CursorParser`]: an explicit pull loop over namespace-resolved
//!   `quick-xml` events
//!
//! All three share one matching policy. `deposit`, `depositor`, `account-id`
//! and `time-constraint` match by local name in any namespace, while
//! `amount-on-deposit` and `interest` only match inside [`FINANCIAL_NS`].
//! The `name` attribute must be in [`BANK_NS`]. For any well-formed document
//! the strategies produce identical collections.
//!
//! ```rust,no_run
//! use deposit_xml::parser::{DepositParser, ParserKind};
//! use std::path::Path;
//!
//! let db = ParserKind::Cursor.parser().parse(Path::new("xml/deposits.xml"))?;
//! for deposit in &db {
//!     println!("{}", deposit);
//! }
//! # Ok::<(), deposit_xml::parser::ParseError>(())
//! ```

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::deposit::DepositsDb;

mod callback;
mod cursor;
mod error;
mod events;
mod fields;
mod tree;


pub use callback::CallbackParser;
pub use cursor::CursorParser;
pub use error::ParseError;
pub use events::{ContentHandler, EventDriver, StartElement, XmlAttribute, XmlName};
pub use tree::TreeParser;

/// Namespace of bank attributes (`bank:name`)
pub const BANK_NS: &str = "www.example.org/xmlns/bank";

/// Namespace of monetary elements (`fin:amount-on-deposit`, `fin:interest`)
pub const FINANCIAL_NS: &str = "www.example.org/xmlns/financial";

/// Read buffer size used when parsing from a file
const INPUT_BUFFER_SIZE: usize = 64 * 1024;

/// Common capability of every parsing strategy
pub trait DepositParser {
    /// Which strategy this is
    fn kind(&self) -> ParserKind;

    /// Parse a complete document from a buffered reader
    fn parse_reader(&self, reader: &mut dyn BufRead) -> Result<DepositsDb, ParseError>;

    /// Parse a document file; the file is closed before returning
    fn parse(&self, path: &Path) -> Result<DepositsDb, ParseError> {
        debug!("{} parser reading {}", self.kind(), path.display());
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(INPUT_BUFFER_SIZE, file);
        let db = self.parse_reader(&mut reader)?;
        debug!("{} parser loaded {} deposits", self.kind(), db.len());
        Ok(db)
    }

    /// Parse a document held in memory
    fn parse_str(&self, xml: &str) -> Result<DepositsDb, ParseError> {
        self.parse_reader(&mut xml.as_bytes())
    }
}

/// Error returned for an unrecognised strategy or sort selector
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {kind} choice: '{value}' (expected one of: {expected})")]
pub struct UnknownSelector {
    /// Selector family ("parser" or "sort key")
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
    /// Accepted values
    pub expected: &'static str,
}

/// Parser strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserKind {
    /// Whole-document tree
    Tree,
    /// Push events to a content handler
    Callback,
    /// Pull events through a cursor
    Cursor,
}

impl ParserKind {
    /// All strategies
    pub const ALL: [ParserKind; 3] = [ParserKind::Tree, ParserKind::Callback, ParserKind::Cursor];

    /// Selector name
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Callback => "callback",
            Self::Cursor => "cursor",
        }
    }

    /// Instantiate the strategy
    pub fn parser(self) -> Box<dyn DepositParser> {
        match self {
            Self::Tree => Box::new(TreeParser),
            Self::Callback => Box::new(CallbackParser),
            Self::Cursor => Box::new(CursorParser),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserKind {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownSelector {
                kind: "parser",
                value: s.to_string(),
                expected: "tree, callback, cursor",
            })
    }
}
