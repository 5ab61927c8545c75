//! # deposit-xml - Bank Deposit Records from XML
//!
//! `deposit_xml` loads bank deposit records from namespace-qualified XML
//! documents, validates them against an XML Schema, sorts them and renders
//! an HTML report through an XSLT stylesheet.
//!
//! ## Key Features
//!
//! - **Three Parser Strategies**: an in-memory tree walk ([`parser::TreeParser`]),
//!   a push-style callback handler ([`parser::CallbackParser`]) and an explicit
//!   pull loop ([`parser::CursorParser`]). All three produce identical results.
//!
//! - **Exact Amounts**: amounts and interest rates are parsed into
//!   [`rust_decimal::Decimal`] with their original scale preserved.
//!
//! - **Closed Enumerations**: deposit types and ISO 3166-1 country codes are
//!   checked while parsing, so an unknown code fails the whole document.
//!
//! - **External Tooling**: schema validation and report rendering are
//!   delegated to `xmllint` and `xsltproc` behind small traits.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deposit_xml::parser::{DepositParser, ParserKind};
//! use deposit_xml::processor::SortKey;
//!
//! let mut deposits = ParserKind::Cursor.parser().parse("xml/deposits.xml".as_ref())?;
//! deposits
//!     .deposits_mut()
//!     .sort_by(|a, b| SortKey::Amount.compare(a, b));
//!
//! for deposit in &deposits {
//!     println!("{}", deposit);
//! }
//! # Ok::<(), deposit_xml::parser::ParseError>(())
//! ```
//!
//! ## Document Layout
//!
//! ```text
//! <deposits xmlns:bank="www.example.org/xmlns/bank"
//!           xmlns:fin="www.example.org/xmlns/financial">
//!   <deposit id="1" type="savings" bank:name="First Bank" country="US">
//!     <depositor>Alice</depositor>
//!     <account-id>100</account-id>
//!     <fin:amount-on-deposit>1000.50</fin:amount-on-deposit>
//!     <fin:interest>2.25</fin:interest>
//!     <time-constraint>365</time-constraint>
//!   </deposit>
//! </deposits>
//! ```
//!
//! ## Architecture
//!
//! - [`deposit`]: record model, closed code sets and the record builder
//! - [`parser`]: the parser trait and its three strategies
//! - [`processor`]: stateful open/validate/read/sort/print/render workflow
//! - [`external`]: `xmllint` and `xsltproc` collaborators
//! - [`writer`]: serialises a collection back to XML

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod deposit;
pub mod external;
pub mod parser;
pub mod processor;
pub mod writer;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::deposit::{CountryCode, Deposit, DepositType, DepositsDb};
    pub use crate::external::{SchemaValidator, StyleTransform, ToolError};
    pub use crate::parser::{
        CallbackParser, CursorParser, DepositParser, ParseError, ParserKind, TreeParser,
    };
    pub use crate::processor::{DepositProcessor, ProcessorError, SortKey};
    pub use crate::writer::{write_deposits, write_deposits_to_file, WriteError};
}
