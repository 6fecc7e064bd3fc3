//! Money type for representing settlement amounts
//!
//! Wraps `rust_decimal::Decimal` so that splitting an amount three ways or
//! converting through an exchange rate keeps full precision. Rounding only
//! happens when an amount is displayed or exported.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbols accepted in front of a typed amount
const ACCEPTED_SYMBOLS: [char; 5] = ['$', '₩', '€', '£', '¥'];

/// Zero threshold for settlement math: one cent of the settlement currency.
pub const SETTLEMENT_EPSILON: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

/// A monetary amount with full decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create a Money amount from a decimal value
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a Money amount from a whole number of units
    ///
    /// # Examples
    /// ```
    /// use tripsplit::models::Money;
    /// assert_eq!(Money::from_units(90).to_string(), "90.00");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a Money amount from minor units (cents)
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Convert a floating point value, rejecting NaN, infinities and negatives
    pub fn try_from_f64(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite(value.to_string()));
        }
        if value < 0.0 {
            return Err(MoneyParseError::Negative(value.to_string()));
        }
        Decimal::from_f64(value)
            .map(Self)
            .ok_or_else(|| MoneyParseError::InvalidFormat(value.to_string()))
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is exactly zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Check if the amount is within one settlement epsilon of zero
    pub fn is_negligible(&self) -> bool {
        self.abs() < SETTLEMENT_EPSILON
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Add two amounts, returning `None` on overflow
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Subtract an amount, returning `None` on overflow
    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Add two amounts, clamping at the representable bounds
    pub fn saturating_add(&self, other: Money) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Divide by a decimal, returning `None` on division by zero or overflow
    pub fn checked_div(&self, divisor: Decimal) -> Option<Self> {
        self.0.checked_div(divisor).map(Self)
    }

    /// Split the amount evenly between `ways` shares
    ///
    /// Returns `None` for zero shares rather than dividing by zero.
    pub fn split(&self, ways: usize) -> Option<Self> {
        if ways == 0 {
            return None;
        }
        self.checked_div(Decimal::from(ways))
    }

    /// Round to two decimal places for presentation
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounded value as `f64`, for CSV and other lossy outputs
    pub fn to_f64_rounded(&self) -> f64 {
        self.rounded().0.to_f64().unwrap_or_default()
    }

    /// Parse a free-form amount typed by a user
    ///
    /// Accepts formats: "10.50", "$10.50", "1,200", "145_000", "₩145000".
    /// Negative, non-numeric, NaN and infinite input is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped.trim_start()),
            None => (false, trimmed),
        };

        let rest = rest.strip_prefix(&ACCEPTED_SYMBOLS[..]).unwrap_or(rest);
        let cleaned: String = rest.chars().filter(|c| *c != ',' && *c != '_').collect();

        let lowered = cleaned.to_ascii_lowercase();
        if lowered == "nan" || lowered.trim_start_matches('+').starts_with("inf") {
            return Err(MoneyParseError::NotFinite(s.to_string()));
        }

        let value = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        if (negative || value.is_sign_negative()) && !value.is_zero() {
            return Err(MoneyParseError::Negative(s.to_string()));
        }

        Ok(Self(value.abs()))
    }

    /// Format with a currency symbol, rounded to two places
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.rounded();
        if rounded.is_negative() {
            format!("-{}{:.2}", symbol, rounded.0.abs())
        } else {
            format!("{}{:.2}", symbol, rounded.0)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded().0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Amount is empty")]
    Empty,
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
    #[error("Amount is not a finite number: {0}")]
    NotFinite(String),
    #[error("Amount cannot be negative: {0}")]
    Negative(String),
}
