//! Field extraction shared by all strategies.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::{ParseError, BANK_NS, FINANCIAL_NS};
use crate::deposit::{CountryCode, Deposit, DepositBuilder, DepositField, DepositType};

/// Local name of the record element
pub(crate) const DEPOSIT_ELEMENT: &str = "deposit";

pub(crate) fn is_deposit(local_name: &str) -> bool {
    local_name == DEPOSIT_ELEMENT
}

/// Child elements whose text content fills a deposit field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextField {
    Depositor,
    AccountId,
    AmountOnDeposit,
    Interest,
    TimeConstraint,
}

impl TextField {
    pub(crate) const ALL: [TextField; 5] = [
        TextField::Depositor,
        TextField::AccountId,
        TextField::AmountOnDeposit,
        TextField::Interest,
        TextField::TimeConstraint,
    ];

    pub(crate) const fn local_name(&self) -> &'static str {
        match self {
            Self::Depositor => "depositor",
            Self::AccountId => "account-id",
            Self::AmountOnDeposit => "amount-on-deposit",
            Self::Interest => "interest",
            Self::TimeConstraint => "time-constraint",
        }
    }

    /// Required namespace, `None` when any namespace is accepted
    pub(crate) const fn namespace(&self) -> Option<&'static str> {
        match self {
            Self::AmountOnDeposit | Self::Interest => Some(FINANCIAL_NS),
            _ => None,
        }
    }

    pub(crate) const fn field(&self) -> DepositField {
        match self {
            Self::Depositor => DepositField::Depositor,
            Self::AccountId => DepositField::AccountId,
            Self::AmountOnDeposit => DepositField::AmountOnDeposit,
            Self::Interest => DepositField::Interest,
            Self::TimeConstraint => DepositField::TimeConstraint,
        }
    }

    pub(crate) fn matches(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.local_name() == local_name
            && self.namespace().map_or(true, |required| namespace == Some(required))
    }

    /// Field an element fills, if any
    pub(crate) fn for_element(namespace: Option<&str>, local_name: &str) -> Option<TextField> {
        Self::ALL
            .into_iter()
            .find(|f| f.matches(namespace, local_name))
    }

    /// Convert trimmed text and store it on the builder
    pub(crate) fn apply(
        &self,
        builder: &mut DepositBuilder,
        text: &str,
        position: usize,
    ) -> Result<(), ParseError> {
        let text = text.trim();
        let field = self.field();
        match self {
            Self::Depositor => {
                builder.depositor(text);
            }
            Self::AccountId => {
                builder.account_id(parse_integer(text, field, position)?);
            }
            Self::AmountOnDeposit => {
                builder.amount_on_deposit(parse_decimal(text, field, position)?);
            }
            Self::Interest => {
                builder.interest(parse_decimal(text, field, position)?);
            }
            Self::TimeConstraint => {
                builder.time_constraint(parse_integer(text, field, position)?);
            }
        }
        Ok(())
    }
}

fn parse_integer<T>(text: &str, field: DepositField, position: usize) -> Result<T, ParseError>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    text.parse().map_err(|e: std::num::ParseIntError| ParseError::InvalidValue {
        position,
        field,
        value: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_decimal(text: &str, field: DepositField, position: usize) -> Result<Decimal, ParseError> {
    // from_str_exact refuses input that would need rounding
    Decimal::from_str_exact(text).map_err(|e| ParseError::InvalidValue {
        position,
        field,
        value: text.to_string(),
        reason: e.to_string(),
    })
}

fn required(
    value: Option<String>,
    field: DepositField,
    position: usize,
) -> Result<String, ParseError> {
    value
        .map(|v| v.trim().to_string())
        .ok_or(ParseError::MissingField { position, field })
}

/// Field elements currently open inside a deposit, innermost last
///
/// Text is collected for every open field, nested elements included, and
/// converted when the field's own element closes. A field that is already
/// set or already open is not collected again, so the first occurrence in
/// document order wins.
#[derive(Debug, Default)]
pub(crate) struct OpenFields {
    open: Vec<OpenField>,
}

#[derive(Debug)]
struct OpenField {
    field: TextField,
    depth: usize,
    text: String,
}

impl OpenFields {
    /// Start collecting `field` for the element opened at `depth`
    pub(crate) fn open(&mut self, field: TextField, depth: usize, builder: &DepositBuilder) {
        let claimed =
            builder.has(field.field()) || self.open.iter().any(|open| open.field == field);
        if !claimed {
            self.open.push(OpenField {
                field,
                depth,
                text: String::new(),
            });
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        for open in &mut self.open {
            open.text.push_str(text);
        }
    }

    /// Commit the innermost field if its element is the one closing at `depth`
    pub(crate) fn close(
        &mut self,
        depth: usize,
        builder: &mut DepositBuilder,
        position: usize,
    ) -> Result<(), ParseError> {
        if self.open.last().is_some_and(|open| open.depth == depth) {
            if let Some(open) = self.open.pop() {
                open.field.apply(builder, &open.text, position)?;
            }
        }
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.open.clear();
    }
}

/// Start a record from the attributes of a `deposit` element
///
/// `attribute` looks up an attribute value by (namespace, local name).
pub(crate) fn start_deposit<F>(position: usize, mut attribute: F) -> Result<DepositBuilder, ParseError>
where
    F: FnMut(Option<&str>, &str) -> Result<Option<String>, ParseError>,
{
    let id = required(attribute(None, "id")?, DepositField::Id, position)?;
    let deposit_type = required(attribute(None, "type")?, DepositField::Type, position)?;
    let name = required(attribute(Some(BANK_NS), "name")?, DepositField::Name, position)?;
    let country = required(attribute(None, "country")?, DepositField::Country, position)?;

    let deposit_type = DepositType::from_str(&deposit_type)
        .map_err(|source| ParseError::UnknownCode { position, source })?;
    let country = CountryCode::from_str(&country)
        .map_err(|source| ParseError::UnknownCode { position, source })?;

    let mut builder = DepositBuilder::new();
    builder
        .id(id)
        .deposit_type(deposit_type)
        .name(name)
        .country(country);
    Ok(builder)
}

/// Complete a record, reporting the first missing field
pub(crate) fn finish_deposit(builder: DepositBuilder, position: usize) -> Result<Deposit, ParseError> {
    builder
        .build()
        .map_err(|field| ParseError::MissingField { position, field })
}
