use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::{CountryCode, DepositType};

/// A single bank deposit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deposit {
    /// Record identifier, unique within a document
    pub id: String,

    /// Deposit category
    #[serde(rename = "type")]
    pub deposit_type: DepositType,

    /// Name of the bank holding the deposit
    pub name: String,

    /// Country of the bank
    pub country: CountryCode,

    /// Name of the depositor
    pub depositor: String,

    /// Account number
    pub account_id: i32,

    /// Amount currently on deposit
    pub amount_on_deposit: Decimal,

    /// Interest rate
    pub interest: Decimal,

    /// Deposit term
    pub time_constraint: i64,
}

impl fmt::Display for Deposit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} | {} ({}, {}) | account {} | amount {} | interest {} | term {}",
            self.id,
            self.depositor,
            self.name,
            self.country,
            self.deposit_type,
            self.account_id,
            self.amount_on_deposit,
            self.interest,
            self.time_constraint
        )
    }
}

/// Ordered collection of deposits loaded from one document
///
/// Records keep document order until the collection is explicitly sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepositsDb {
    deposits: Vec<Deposit>,
}

impl DepositsDb {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed record
    pub fn push(&mut self, deposit: Deposit) {
        self.deposits.push(deposit);
    }

    /// Records in current order
    pub fn deposits(&self) -> &[Deposit] {
        &self.deposits
    }

    /// Mutable access for in-place reordering
    pub fn deposits_mut(&mut self) -> &mut Vec<Deposit> {
        &mut self.deposits
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.deposits.len()
    }

    /// Whether the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.deposits.is_empty()
    }

    /// Iterate over records in current order
    pub fn iter(&self) -> std::slice::Iter<'_, Deposit> {
        self.deposits.iter()
    }
}

impl From<Vec<Deposit>> for DepositsDb {
    fn from(deposits: Vec<Deposit>) -> Self {
        Self { deposits }
    }
}

impl<'a> IntoIterator for &'a DepositsDb {
    type Item = &'a Deposit;
    type IntoIter = std::slice::Iter<'a, Deposit>;

    fn into_iter(self) -> Self::IntoIter {
        self.deposits.iter()
    }
}

impl IntoIterator for DepositsDb {
    type Item = Deposit;
    type IntoIter = std::vec::IntoIter<Deposit>;

    fn into_iter(self) -> Self::IntoIter {
        self.deposits.into_iter()
    }
}
