//! Net positions and the outstanding total

use crate::models::{ExpenseId, Money};

use super::{MemberBalance, NetPosition};

/// Net position (paid - owed) of each member, keeping roster order
pub fn calculate_nets(balances: &[MemberBalance]) -> Vec<NetPosition> {
    balances
        .iter()
        .map(|balance| NetPosition {
            member_id: balance.member_id.clone(),
            net: balance.net(),
        })
        .collect()
}

/// Headline "amount left to settle": the sum of the aggregated expense totals
///
/// Saturates instead of overflowing. Totals produced by
/// [`aggregate`](super::aggregate) always fit.
pub fn total_outstanding(expense_totals: &[(ExpenseId, Money)]) -> Money {
    expense_totals
        .iter()
        .fold(Money::ZERO, |sum, (_, total)| sum.saturating_add(*total))
}
