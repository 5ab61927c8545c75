use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a code does not belong to a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind} code: '{value}'")]
pub struct UnknownCode {
    /// Name of the enumeration that rejected the code
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl UnknownCode {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Category of a bank deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositType {
    /// Demand deposit, withdrawable at any time
    Demand,
    /// Fixed-term deposit
    Urgent,
    /// Settlement (current) account
    Settlement,
    /// Accumulation deposit with regular top-ups
    Accumulation,
    /// Savings deposit
    Savings,
    /// Precious metal deposit
    Metal,
}

impl DepositType {
    /// Every deposit type, in declaration order
    pub const ALL: [DepositType; 6] = [
        DepositType::Demand,
        DepositType::Urgent,
        DepositType::Settlement,
        DepositType::Accumulation,
        DepositType::Savings,
        DepositType::Metal,
    ];

    /// Canonical code used in the `type` attribute
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Demand => "demand",
            Self::Urgent => "urgent",
            Self::Settlement => "settlement",
            Self::Accumulation => "accumulation",
            Self::Savings => "savings",
            Self::Metal => "metal",
        }
    }
}

impl FromStr for DepositType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownCode::new("deposit type", s))
    }
}

impl fmt::Display for DepositType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_type_codes() {
        for t in DepositType::ALL {
            assert_eq!(t.as_str().parse::<DepositType>().unwrap(), t);
        }
    }

    #[test]
    fn test_unknown_deposit_type() {
        let err = "Savings".parse::<DepositType>().unwrap_err();
        assert_eq!(err.kind, "deposit type");
        assert_eq!(err.value, "Savings");
        assert_eq!(err.to_string(), "Unknown deposit type code: 'Savings'");
    }
}
