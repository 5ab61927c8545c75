use crate::deposit::{DepositField, UnknownCode};

/// Errors that can occur while parsing a deposits document
///
/// Any of these aborts the whole parse; no partial collection is returned.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Error from the streaming XML reader
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Error building the in-memory document tree
    #[error("XML document error: {0}")]
    TreeError(#[from] roxmltree::Error),

    /// I/O error while reading the input
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// UTF-8 encoding error in names or text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// A namespace prefix is used without being declared
    #[error("Undeclared namespace prefix: {0}")]
    UnboundPrefix(String),

    /// The document as a whole is not usable
    #[error("Invalid document structure: {0}")]
    InvalidStructure(String),

    /// A deposit lacks a required attribute or child element
    #[error("Deposit #{position}: missing required field '{field}'")]
    MissingField {
        /// 1-based position of the deposit in document order
        position: usize,
        /// The absent field
        field: DepositField,
    },

    /// A field holds text that cannot be converted to its type
    #[error("Deposit #{position}: invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        /// 1-based position of the deposit in document order
        position: usize,
        /// The offending field
        field: DepositField,
        /// Raw (trimmed) text
        value: String,
        /// Conversion failure description
        reason: String,
    },

    /// An enumerated field holds a code outside its closed set
    #[error("Deposit #{position}: {source}")]
    UnknownCode {
        /// 1-based position of the deposit in document order
        position: usize,
        /// The rejected code
        source: UnknownCode,
    },
}

impl From<quick_xml::events::attributes::AttrError> for ParseError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ParseError::XmlError(quick_xml::Error::from(err))
    }
}
