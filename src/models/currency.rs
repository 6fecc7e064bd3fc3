//! Currency tags and normalization into the settlement currency
//!
//! A trip works with two currencies: the PRIMARY one everything settles in,
//! and a SECONDARY local currency converted at a fixed, configured rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Currency an expense was entered in
///
/// Stored as a plain tag string. Tags other than `primary`/`secondary` are
/// kept verbatim so that a bad record survives a load/save cycle and can be
/// reported instead of failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    #[default]
    Primary,
    Secondary,
    Unrecognized(String),
}

impl Currency {
    /// Parse a tag, accepting the configured currency codes as aliases
    pub fn parse_with_codes(tag: &str, primary_code: &str, secondary_code: &str) -> Self {
        let trimmed = tag.trim();
        if trimmed.eq_ignore_ascii_case(primary_code) {
            Self::Primary
        } else if trimmed.eq_ignore_ascii_case(secondary_code) {
            Self::Secondary
        } else {
            Self::from(trimmed.to_string())
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Currency {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            _ => Self::Unrecognized(tag),
        }
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Primary => "primary".to_string(),
            Currency::Secondary => "secondary".to_string(),
            Currency::Unrecognized(tag) => tag,
        }
    }
}

impl FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
            Self::Unrecognized(tag) => write!(f, "{}", tag),
        }
    }
}

/// Why an amount could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("unrecognized currency tag '{0}'")]
    UnrecognizedCurrency(String),
    #[error("amount {0} is negative")]
    NegativeAmount(Money),
    #[error("amount {0} cannot be converted without overflow")]
    Overflow(Money),
    #[error("exchange rate must be positive, got {0}")]
    InvalidRate(Decimal),
}

/// Fixed conversion factor: SECONDARY units per one PRIMARY unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Rate used when none is configured
    pub const DEFAULT: ExchangeRate = ExchangeRate(Decimal::from_parts(1450, 0, 0, false, 0));

    pub fn new(rate: Decimal) -> Result<Self, NormalizeError> {
        if rate <= Decimal::ZERO {
            return Err(NormalizeError::InvalidRate(rate));
        }
        Ok(Self(rate))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Express `amount` in the settlement (PRIMARY) currency
    ///
    /// No rounding is applied; precision is kept until presentation.
    pub fn normalize(&self, amount: Money, currency: &Currency) -> Result<Money, NormalizeError> {
        if amount.is_negative() {
            return Err(NormalizeError::NegativeAmount(amount));
        }
        match currency {
            Currency::Primary => Ok(amount),
            Currency::Secondary => amount
                .checked_div(self.0)
                .ok_or(NormalizeError::Overflow(amount)),
            Currency::Unrecognized(tag) => Err(NormalizeError::UnrecognizedCurrency(tag.clone())),
        }
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = NormalizeError;

    fn try_from(rate: Decimal) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.0
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
