use std::fmt;

use rust_decimal::Decimal;

use super::{CountryCode, Deposit, DepositType};

/// The nine fields of a deposit record, named as they appear in XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepositField {
    /// `id` attribute
    Id,
    /// `type` attribute
    Type,
    /// `bank:name` attribute
    Name,
    /// `country` attribute
    Country,
    /// `depositor` element
    Depositor,
    /// `account-id` element
    AccountId,
    /// `fin:amount-on-deposit` element
    AmountOnDeposit,
    /// `fin:interest` element
    Interest,
    /// `time-constraint` element
    TimeConstraint,
}

impl DepositField {
    /// Qualified XML name of the attribute or element
    pub const fn xml_name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Type => "type",
            Self::Name => "bank:name",
            Self::Country => "country",
            Self::Depositor => "depositor",
            Self::AccountId => "account-id",
            Self::AmountOnDeposit => "fin:amount-on-deposit",
            Self::Interest => "fin:interest",
            Self::TimeConstraint => "time-constraint",
        }
    }
}

impl fmt::Display for DepositField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xml_name())
    }
}

/// Collects deposit fields one at a time and yields a [`Deposit`] once all
/// nine are present
#[derive(Debug, Clone, Default)]
pub struct DepositBuilder {
    id: Option<String>,
    deposit_type: Option<DepositType>,
    name: Option<String>,
    country: Option<CountryCode>,
    depositor: Option<String>,
    account_id: Option<i32>,
    amount_on_deposit: Option<Decimal>,
    interest: Option<Decimal>,
    time_constraint: Option<i64>,
}

impl DepositBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record id
    pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Set the deposit type
    pub fn deposit_type(&mut self, deposit_type: DepositType) -> &mut Self {
        self.deposit_type = Some(deposit_type);
        self
    }

    /// Set the bank name
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Set the bank country
    pub fn country(&mut self, country: CountryCode) -> &mut Self {
        self.country = Some(country);
        self
    }

    /// Set the depositor name
    pub fn depositor(&mut self, depositor: impl Into<String>) -> &mut Self {
        self.depositor = Some(depositor.into());
        self
    }

    /// Set the account number
    pub fn account_id(&mut self, account_id: i32) -> &mut Self {
        self.account_id = Some(account_id);
        self
    }

    /// Set the amount on deposit
    pub fn amount_on_deposit(&mut self, amount: Decimal) -> &mut Self {
        self.amount_on_deposit = Some(amount);
        self
    }

    /// Set the interest
    pub fn interest(&mut self, interest: Decimal) -> &mut Self {
        self.interest = Some(interest);
        self
    }

    /// Set the deposit term
    pub fn time_constraint(&mut self, time_constraint: i64) -> &mut Self {
        self.time_constraint = Some(time_constraint);
        self
    }

    /// Whether `field` already holds a value
    pub fn has(&self, field: DepositField) -> bool {
        match field {
            DepositField::Id => self.id.is_some(),
            DepositField::Type => self.deposit_type.is_some(),
            DepositField::Name => self.name.is_some(),
            DepositField::Country => self.country.is_some(),
            DepositField::Depositor => self.depositor.is_some(),
            DepositField::AccountId => self.account_id.is_some(),
            DepositField::AmountOnDeposit => self.amount_on_deposit.is_some(),
            DepositField::Interest => self.interest.is_some(),
            DepositField::TimeConstraint => self.time_constraint.is_some(),
        }
    }

    /// Finish the record, or report the first missing field
    pub fn build(self) -> Result<Deposit, DepositField> {
        Ok(Deposit {
            id: self.id.ok_or(DepositField::Id)?,
            deposit_type: self.deposit_type.ok_or(DepositField::Type)?,
            name: self.name.ok_or(DepositField::Name)?,
            country: self.country.ok_or(DepositField::Country)?,
            depositor: self.depositor.ok_or(DepositField::Depositor)?,
            account_id: self.account_id.ok_or(DepositField::AccountId)?,
            amount_on_deposit: self
                .amount_on_deposit
                .ok_or(DepositField::AmountOnDeposit)?,
            interest: self.interest.ok_or(DepositField::Interest)?,
            time_constraint: self.time_constraint.ok_or(DepositField::TimeConstraint)?,
        })
    }
}
