//! Greedy transfer matching
//!
//! Creditors (largest first) are paired with debtors (most negative first)
//! using two cursors. This settles everyone but is not guaranteed to use the
//! fewest possible transfers for every distribution of nets.

use crate::models::{MemberId, Money, SETTLEMENT_EPSILON};

use super::{NetPosition, Transfer};

/// Produce transfers that bring every net position to within epsilon of zero
pub fn match_transfers(positions: &[NetPosition]) -> Vec<Transfer> {
    let mut creditors: Vec<(MemberId, Money)> = positions
        .iter()
        .filter(|p| p.net > SETTLEMENT_EPSILON)
        .map(|p| (p.member_id.clone(), p.net))
        .collect();
    let mut debtors: Vec<(MemberId, Money)> = positions
        .iter()
        .filter(|p| p.net < -SETTLEMENT_EPSILON)
        .map(|p| (p.member_id.clone(), p.net))
        .collect();

    // Stable sorts: ties keep roster order
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| a.1.cmp(&b.1));

    let mut transfers = Vec::with_capacity(creditors.len() + debtors.len());
    let (mut c, mut d) = (0, 0);

    while c < creditors.len() && d < debtors.len() {
        let amount = debtors[d].1.abs().min(creditors[c].1);

        transfers.push(Transfer {
            from: debtors[d].0.clone(),
            to: creditors[c].0.clone(),
            amount,
        });

        creditors[c].1 -= amount;
        debtors[d].1 += amount;

        if creditors[c].1 < SETTLEMENT_EPSILON {
            c += 1;
        }
        if debtors[d].1.abs() < SETTLEMENT_EPSILON {
            d += 1;
        }
    }

    transfers
}
