//! Expense settlement
//!
//! Turns a snapshot of expenses and the trip roster into a list of
//! peer-to-peer transfers that squares everyone up:
//!
//! 1. [`aggregator`] normalizes amounts and folds them into paid/owed per member
//! 2. [`net`] derives net positions and the outstanding total
//! 3. [`matcher`] pairs debtors with creditors
//!
//! The computation is pure. It never fails on bad records; problems are
//! returned as [`SettlementWarning`]s next to the plan.

pub mod aggregator;
pub mod matcher;
pub mod net;

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::models::{Expense, ExpenseId, ExchangeRate, Member, MemberId, Money, NormalizeError};

pub use aggregator::{aggregate, Aggregation};
pub use matcher::match_transfers;
pub use net::{calculate_nets, total_outstanding};

/// Paid and owed totals of one member, in the settlement currency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub paid: Money,
    pub owed: Money,
}

impl MemberBalance {
    pub fn zero(member_id: MemberId) -> Self {
        Self {
            member_id,
            paid: Money::ZERO,
            owed: Money::ZERO,
        }
    }

    /// Positive when the group owes this member
    pub fn net(&self) -> Money {
        self.paid - self.owed
    }
}

/// A member's net position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetPosition {
    pub member_id: MemberId,
    pub net: Money,
}

/// One payment of the settlement plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Money,
}

/// Data-quality problems found while settling
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettlementWarning {
    /// The expense had an unusable amount or currency and was left out entirely
    SkippedExpense {
        expense_id: ExpenseId,
        title: String,
        #[serde(serialize_with = "serialize_display")]
        reason: NormalizeError,
    },
    /// Item with nobody to split it between
    UnsplitItem {
        expense_id: ExpenseId,
        label: String,
        amount: Money,
    },
    UnknownPayer {
        expense_id: ExpenseId,
        payer_id: MemberId,
    },
    UnknownParticipant {
        expense_id: ExpenseId,
        member_id: MemberId,
    },
    /// Stored total disagrees with the sum of the items
    TotalMismatch {
        expense_id: ExpenseId,
        stored: Money,
        computed: Money,
    },
}

fn serialize_display<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

impl SettlementWarning {
    pub fn expense_id(&self) -> ExpenseId {
        match self {
            Self::SkippedExpense { expense_id, .. }
            | Self::UnsplitItem { expense_id, .. }
            | Self::UnknownPayer { expense_id, .. }
            | Self::UnknownParticipant { expense_id, .. }
            | Self::TotalMismatch { expense_id, .. } => *expense_id,
        }
    }
}

impl fmt::Display for SettlementWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedExpense {
                expense_id,
                title,
                reason,
            } => write!(f, "{} '{}' was skipped: {}", expense_id, title, reason),
            Self::UnsplitItem {
                expense_id,
                label,
                amount,
            } => write!(
                f,
                "{} item '{}' ({}) wasn't split between anyone",
                expense_id, label, amount
            ),
            Self::UnknownPayer {
                expense_id,
                payer_id,
            } => write!(f, "{} was paid by '{}' who is not on the roster", expense_id, payer_id),
            Self::UnknownParticipant {
                expense_id,
                member_id,
            } => write!(
                f,
                "{} includes '{}' who is not on the roster",
                expense_id, member_id
            ),
            Self::TotalMismatch {
                expense_id,
                stored,
                computed,
            } => write!(
                f,
                "{} stored total {} differs from its items ({})",
                expense_id, stored, computed
            ),
        }
    }
}

/// Result of [`compute_settlement`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settlement {
    /// Sum of all aggregated active expenses, in the settlement currency
    pub total_outstanding: Money,
    pub balances: Vec<MemberBalance>,
    pub net_positions: Vec<NetPosition>,
    pub transfers: Vec<Transfer>,
    pub warnings: Vec<SettlementWarning>,
}

impl Settlement {
    /// Number of expenses left out because of invalid amounts or currencies
    pub fn skipped_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, SettlementWarning::SkippedExpense { .. }))
            .count()
    }

    /// Whether some item was not split between anyone
    pub fn has_unsplit_items(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, SettlementWarning::UnsplitItem { .. }))
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Nobody owes anybody
    pub fn is_settled_up(&self) -> bool {
        self.transfers.is_empty()
    }

    pub fn balance_of(&self, member: &MemberId) -> Option<&MemberBalance> {
        self.balances.iter().find(|b| &b.member_id == member)
    }
}

/// Compute the settlement plan for a snapshot of expenses and the roster
///
/// Expenses marked settled are ignored. Identical input always produces
/// identical output.
pub fn compute_settlement(expenses: &[Expense], roster: &[Member], rate: ExchangeRate) -> Settlement {
    let Aggregation {
        balances,
        expense_totals,
        warnings,
    } = aggregate(expenses, roster, rate);

    let net_positions = calculate_nets(&balances);
    let transfers = match_transfers(&net_positions);
    let outstanding = total_outstanding(&expense_totals);

    info!(
        expenses = expense_totals.len(),
        members = balances.len(),
        transfers = transfers.len(),
        warnings = warnings.len(),
        total = %outstanding,
        "computed settlement"
    );

    Settlement {
        total_outstanding: outstanding,
        balances,
        net_positions,
        transfers,
        warnings,
    }
}
