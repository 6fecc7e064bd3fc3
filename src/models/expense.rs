//! Expense model
//!
//! An expense is paid by one member and itemized; each item is split evenly
//! among its own set of participants. Amounts are stored in the currency the
//! expense was entered in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::currency::Currency;
use super::ids::{ExpenseId, MemberId};
use super::money::Money;

/// A single line of an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// What the line was for
    pub label: String,

    /// Amount in the expense's currency
    pub amount: Money,

    /// Members sharing this line
    #[serde(default)]
    pub participant_ids: Vec<MemberId>,
}

impl ExpenseItem {
    pub fn new(label: impl Into<String>, amount: Money, participants: Vec<MemberId>) -> Self {
        let mut item = Self {
            label: label.into(),
            amount,
            participant_ids: participants,
        };
        item.dedup_participants();
        item
    }

    /// Collapse repeated participant ids, keeping first-seen order
    pub fn dedup_participants(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.participant_ids.retain(|id| seen.insert(id.clone()));
    }

    /// Distinct participants, in first-seen order
    pub fn participants(&self) -> Vec<&MemberId> {
        let mut seen = std::collections::HashSet::new();
        self.participant_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    pub fn is_unsplit(&self) -> bool {
        self.participant_ids.is_empty()
    }
}

/// A shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// Short description ("Dinner in Myeongdong")
    pub title: String,

    /// Member who paid
    pub payer_id: MemberId,

    /// Currency the item amounts are expressed in
    #[serde(default)]
    pub currency: Currency,

    /// Itemized lines
    #[serde(default)]
    pub items: Vec<ExpenseItem>,

    /// Settled expenses stay in history but leave the balance computation
    #[serde(default)]
    pub is_settled: bool,

    /// Denormalized total in PRIMARY units, as last written by the CRUD layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Money>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        payer_id: MemberId,
        currency: Currency,
        items: Vec<ExpenseItem>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            title: title.into(),
            payer_id,
            currency,
            items,
            is_settled: false,
            total_amount: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of raw item amounts, in the expense's own currency
    ///
    /// `None` if the amounts are too large to add up.
    pub fn item_sum(&self) -> Option<Money> {
        self.items
            .iter()
            .try_fold(Money::ZERO, |total, item| total.checked_add(item.amount))
    }

    /// Whether any member id appears as payer or participant
    pub fn involves(&self, member: &MemberId) -> bool {
        &self.payer_id == member
            || self
                .items
                .iter()
                .any(|item| item.participant_ids.contains(member))
    }

    pub fn set_settled(&mut self, settled: bool) {
        self.is_settled = settled;
        self.updated_at = Utc::now();
    }

    /// Flip the settled flag, returning the new value
    pub fn toggle_settled(&mut self) -> bool {
        self.set_settled(!self.is_settled);
        self.is_settled
    }

    /// Validate the expense before it is persisted
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.title.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyTitle);
        }
        if self.items.is_empty() {
            return Err(ExpenseValidationError::NoItems);
        }
        if !self.currency.is_recognized() {
            return Err(ExpenseValidationError::UnrecognizedCurrency(
                self.currency.to_string(),
            ));
        }
        for item in &self.items {
            if item.label.trim().is_empty() {
                return Err(ExpenseValidationError::EmptyItemLabel);
            }
            if item.amount.is_negative() {
                return Err(ExpenseValidationError::NegativeAmount(item.label.clone()));
            }
        }
        if self.item_sum().is_none() {
            return Err(ExpenseValidationError::TotalTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item_sum() {
            Some(total) => write!(f, "{} ({} {})", self.title, total, self.currency),
            None => write!(f, "{} (overflowing total, {})", self.title, self.currency),
        }
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Expense title cannot be empty")]
    EmptyTitle,
    #[error("Expense must have at least one item")]
    NoItems,
    #[error("Item label cannot be empty")]
    EmptyItemLabel,
    #[error("Item '{0}' has a negative amount")]
    NegativeAmount(String),
    #[error("Unrecognized currency '{0}'")]
    UnrecognizedCurrency(String),
    #[error("Item amounts are too large to add up")]
    TotalTooLarge,
}
