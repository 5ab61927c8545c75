//! # Deposit Record Model
//!
//! Plain data types for bank deposit records as they appear in a deposits
//! XML document:
//!
//! ```text
//! deposits
//! └── deposit* (id, type, bank:name, country)
//!     ├── depositor
//!     ├── account-id
//!     ├── fin:amount-on-deposit
//!     ├── fin:interest
//!     └── time-constraint
//! ```
//!
//! A [`Deposit`] is always fully populated. Parsers assemble records through
//! [`DepositBuilder`], which refuses to produce a record while any field is
//! missing.

mod builder;
mod country;
mod model;
mod types;

pub use builder::{DepositBuilder, DepositField};
pub use country::CountryCode;
pub use model::{Deposit, DepositsDb};
pub use types::{DepositType, UnknownCode};
