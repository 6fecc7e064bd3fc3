//! Balance aggregation
//!
//! Folds the active expenses into a paid/owed ledger per roster member.
//! Every roster member gets an entry, even with no expenses at all.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Expense, ExpenseId, ExchangeRate, Member, MemberId, Money, NormalizeError};

use super::{MemberBalance, SettlementWarning};

/// Output of [`aggregate`]
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// One entry per distinct roster member, in roster order
    pub balances: Vec<MemberBalance>,
    /// Recomputed PRIMARY total of every expense that was aggregated
    pub expense_totals: Vec<(ExpenseId, Money)>,
    pub warnings: Vec<SettlementWarning>,
}

/// Aggregate paid and owed amounts for each roster member
///
/// Settled expenses are ignored. An expense with any item that cannot be
/// normalized, or whose amounts would overflow a running total, is skipped
/// as a whole and reported. Unknown payers and participants are ignored and
/// reported; items with no participants count toward the payer's `paid` only.
pub fn aggregate(expenses: &[Expense], roster: &[Member], rate: ExchangeRate) -> Aggregation {
    let mut balances: Vec<MemberBalance> = Vec::with_capacity(roster.len());
    let mut index: HashMap<&MemberId, usize> = HashMap::with_capacity(roster.len());
    for member in roster {
        if index.contains_key(&member.id) {
            continue;
        }
        index.insert(&member.id, balances.len());
        balances.push(MemberBalance::zero(member.id.clone()));
    }

    let mut expense_totals = Vec::new();
    let mut warnings = Vec::new();
    let mut outstanding = Money::ZERO;

    for expense in expenses.iter().filter(|e| !e.is_settled) {
        let applied = expense_effect(expense, rate, &index, &balances).and_then(|effect| {
            let total = effect.total;
            match outstanding.checked_add(total) {
                Some(next) => Ok((effect, next)),
                None => Err(NormalizeError::Overflow(total)),
            }
        });

        let (effect, next_outstanding) = match applied {
            Ok(applied) => applied,
            Err(reason) => {
                debug!(expense = %expense.id, %reason, "skipping expense");
                warnings.push(SettlementWarning::SkippedExpense {
                    expense_id: expense.id,
                    title: expense.title.clone(),
                    reason,
                });
                continue;
            }
        };

        outstanding = next_outstanding;
        for (slot, balance) in effect.updated {
            balances[slot] = balance;
        }
        warnings.extend(effect.warnings);
        expense_totals.push((expense.id, effect.total));
    }

    Aggregation {
        balances,
        expense_totals,
        warnings,
    }
}

/// What one expense does to the ledger, worked out before anything is applied
struct ExpenseEffect {
    total: Money,
    /// New balances of the members the expense touches, by roster slot
    updated: HashMap<usize, MemberBalance>,
    warnings: Vec<SettlementWarning>,
}

fn expense_effect(
    expense: &Expense,
    rate: ExchangeRate,
    index: &HashMap<&MemberId, usize>,
    balances: &[MemberBalance],
) -> Result<ExpenseEffect, NormalizeError> {
    let normalized = expense
        .items
        .iter()
        .map(|item| rate.normalize(item.amount, &expense.currency))
        .collect::<Result<Vec<Money>, _>>()?;

    let total = normalized.iter().try_fold(Money::ZERO, |sum, amount| {
        sum.checked_add(*amount)
            .ok_or(NormalizeError::Overflow(*amount))
    })?;

    let mut updated: HashMap<usize, MemberBalance> = HashMap::new();
    let mut warnings = Vec::new();

    if let Some(stored) = expense.total_amount {
        let agrees = stored
            .checked_sub(total)
            .is_some_and(|diff| diff.is_negligible());
        if !agrees {
            warnings.push(SettlementWarning::TotalMismatch {
                expense_id: expense.id,
                stored,
                computed: total,
            });
        }
    }

    match index.get(&expense.payer_id) {
        Some(&slot) => {
            let balance = updated
                .entry(slot)
                .or_insert_with(|| balances[slot].clone());
            balance.paid = balance
                .paid
                .checked_add(total)
                .ok_or(NormalizeError::Overflow(total))?;
        }
        None => warnings.push(SettlementWarning::UnknownPayer {
            expense_id: expense.id,
            payer_id: expense.payer_id.clone(),
        }),
    }

    for (item, amount) in expense.items.iter().zip(normalized) {
        let participants = item.participants();
        let Some(share) = amount.split(participants.len()) else {
            warnings.push(SettlementWarning::UnsplitItem {
                expense_id: expense.id,
                label: item.label.clone(),
                amount,
            });
            continue;
        };

        for participant in participants {
            match index.get(participant) {
                Some(&slot) => {
                    let balance = updated
                        .entry(slot)
                        .or_insert_with(|| balances[slot].clone());
                    balance.owed = balance
                        .owed
                        .checked_add(share)
                        .ok_or(NormalizeError::Overflow(share))?;
                }
                None => warnings.push(SettlementWarning::UnknownParticipant {
                    expense_id: expense.id,
                    member_id: participant.clone(),
                }),
            }
        }
    }

    Ok(ExpenseEffect {
        total,
        updated,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, ExpenseItem};
    use rust_decimal_macros::dec;

    fn roster() -> Vec<Member> {
        vec![
            Member::new("a", "Ari"),
            Member::new("b", "Bo"),
            Member::new("c", "Cy"),
        ]
    }

    fn ids(names: &[&str]) -> Vec<MemberId> {
        names.iter().map(|n| MemberId::from(*n)).collect()
    }

    fn expense(payer: &str, currency: Currency, items: Vec<ExpenseItem>) -> Expense {
        Expense::new("test", MemberId::from(payer), currency, items)
    }

    fn balance_of<'a>(agg: &'a Aggregation, id: &str) -> &'a MemberBalance {
        agg.balances
            .iter()
            .find(|b| b.member_id.as_str() == id)
            .unwrap()
    }

    #[test]
    fn test_every_roster_member_present() {
        let agg = aggregate(&[], &roster(), ExchangeRate::default());
        assert_eq!(agg.balances.len(), 3);
        assert!(agg
            .balances
            .iter()
            .all(|b| b.paid.is_zero() && b.owed.is_zero()));
        assert!(agg.warnings.is_empty());
    }

    #[test]
    fn test_even_split() {
        let e = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Dinner", Money::from_units(90), ids(&["a", "b", "c"]))],
        );
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert_eq!(balance_of(&agg, "a").paid, Money::from_units(90));
        assert_eq!(balance_of(&agg, "a").owed, Money::from_units(30));
        assert_eq!(balance_of(&agg, "b").owed, Money::from_units(30));
        assert_eq!(balance_of(&agg, "c").paid, Money::ZERO);
    }

    #[test]
    fn test_items_split_independently() {
        let e = expense(
            "b",
            Currency::Primary,
            vec![
                ExpenseItem::new("Food", Money::from_units(60), ids(&["a", "b", "c"])),
                ExpenseItem::new("Wine", Money::from_units(40), ids(&["a", "c"])),
            ],
        );
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert_eq!(balance_of(&agg, "b").paid, Money::from_units(100));
        assert_eq!(balance_of(&agg, "a").owed, Money::from_units(40));
        assert_eq!(balance_of(&agg, "b").owed, Money::from_units(20));
        assert_eq!(balance_of(&agg, "c").owed, Money::from_units(40));
    }

    #[test]
    fn test_secondary_currency_is_normalized() {
        let e = expense(
            "a",
            Currency::Secondary,
            vec![ExpenseItem::new("Hotel", Money::from_units(145_000), ids(&["a", "b"]))],
        );
        let rate = ExchangeRate::new(dec!(1450)).unwrap();
        let agg = aggregate(&[e], &roster(), rate);

        assert_eq!(balance_of(&agg, "a").paid, Money::from_units(100));
        assert_eq!(balance_of(&agg, "b").owed, Money::from_units(50));
        assert_eq!(agg.expense_totals[0].1, Money::from_units(100));
    }

    #[test]
    fn test_settled_expense_ignored() {
        let mut e = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Taxi", Money::from_units(30), ids(&["b"]))],
        );
        e.set_settled(true);
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert!(agg.expense_totals.is_empty());
        assert!(agg.balances.iter().all(|b| b.paid.is_zero() && b.owed.is_zero()));
    }

    #[test]
    fn test_unsplit_item_counts_toward_paid_only() {
        let e = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Mystery", Money::from_units(12), vec![])],
        );
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert_eq!(balance_of(&agg, "a").paid, Money::from_units(12));
        assert!(agg.balances.iter().all(|b| b.owed.is_zero()));
        assert!(matches!(
            agg.warnings.as_slice(),
            [SettlementWarning::UnsplitItem { label, .. }] if label == "Mystery"
        ));
    }

    #[test]
    fn test_unknown_members_are_ignored() {
        let e = expense(
            "zed",
            Currency::Primary,
            vec![ExpenseItem::new("Tickets", Money::from_units(20), ids(&["a", "ghost"]))],
        );
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert_eq!(agg.balances.len(), 3);
        assert!(agg.balances.iter().all(|b| b.paid.is_zero()));
        assert_eq!(balance_of(&agg, "a").owed, Money::from_units(10));
        assert_eq!(agg.warnings.len(), 2);
        assert!(matches!(agg.warnings[0], SettlementWarning::UnknownPayer { .. }));
        assert!(matches!(
            agg.warnings[1],
            SettlementWarning::UnknownParticipant { .. }
        ));
    }

    #[test]
    fn test_bad_item_skips_whole_expense() {
        let good = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Lunch", Money::from_units(20), ids(&["a", "b"]))],
        );
        let bad = expense(
            "b",
            Currency::Primary,
            vec![
                ExpenseItem::new("Bus", Money::from_units(10), ids(&["a", "b"])),
                ExpenseItem::new("Refund", Money::from_units(-4), ids(&["a"])),
            ],
        );
        let agg = aggregate(&[good, bad], &roster(), ExchangeRate::default());

        assert_eq!(agg.expense_totals.len(), 1);
        assert_eq!(balance_of(&agg, "b").paid, Money::ZERO);
        assert_eq!(balance_of(&agg, "a").owed, Money::from_units(10));
        assert!(matches!(
            agg.warnings.as_slice(),
            [SettlementWarning::SkippedExpense { .. }]
        ));
    }

    #[test]
    fn test_unrecognized_currency_skips_expense() {
        let e = expense(
            "a",
            Currency::Unrecognized("JPY".into()),
            vec![ExpenseItem::new("Ramen", Money::from_units(900), ids(&["a", "b"]))],
        );
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert!(agg.expense_totals.is_empty());
        assert_eq!(agg.warnings.len(), 1);
    }

    #[test]
    fn test_stored_total_is_not_trusted() {
        let mut e = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Museum", Money::from_units(30), ids(&["a", "b", "c"]))],
        );
        e.total_amount = Some(Money::from_units(45));
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert_eq!(balance_of(&agg, "a").paid, Money::from_units(30));
        assert!(matches!(
            agg.warnings.as_slice(),
            [SettlementWarning::TotalMismatch { .. }]
        ));
    }

    #[test]
    fn test_duplicate_roster_entries_collapse() {
        let mut members = roster();
        members.push(Member::new("a", "Ari again"));
        let agg = aggregate(&[], &members, ExchangeRate::default());
        assert_eq!(agg.balances.len(), 3);
    }

    fn huge() -> Money {
        Money::parse("50000000000000000000000000000").unwrap()
    }

    #[test]
    fn test_overflowing_item_sum_skips_expense() {
        let lunch = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Lunch", Money::from_units(20), ids(&["a", "b"]))],
        );
        let yacht = expense(
            "b",
            Currency::Primary,
            vec![
                ExpenseItem::new("Hull", huge(), ids(&["a"])),
                ExpenseItem::new("Sails", huge(), ids(&["c"])),
            ],
        );
        let agg = aggregate(&[lunch.clone(), yacht], &roster(), ExchangeRate::default());
        let reference = aggregate(&[lunch], &roster(), ExchangeRate::default());

        assert_eq!(agg.balances, reference.balances);
        assert_eq!(agg.expense_totals.len(), 1);
        assert!(matches!(
            agg.warnings.as_slice(),
            [SettlementWarning::SkippedExpense {
                reason: NormalizeError::Overflow(_),
                ..
            }]
        ));
    }

    #[test]
    fn test_overflowing_payer_total_across_expenses() {
        let first = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Hull", huge(), ids(&["b"]))],
        );
        let second = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Sails", huge(), ids(&["c"]))],
        );
        let agg = aggregate(&[first, second], &roster(), ExchangeRate::default());

        // The second expense leaves no partial credit or debt behind
        assert_eq!(balance_of(&agg, "a").paid, huge());
        assert_eq!(balance_of(&agg, "b").owed, huge());
        assert_eq!(balance_of(&agg, "c").owed, Money::ZERO);
        assert_eq!(agg.expense_totals.len(), 1);
        assert_eq!(agg.warnings.len(), 1);
        assert!(matches!(
            agg.warnings[0],
            SettlementWarning::SkippedExpense {
                reason: NormalizeError::Overflow(_),
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_outstanding_across_payers() {
        let first = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Hull", huge(), ids(&["c"]))],
        );
        let second = expense(
            "b",
            Currency::Primary,
            vec![ExpenseItem::new("Sails", huge(), ids(&["c"]))],
        );
        let agg = aggregate(&[first, second], &roster(), ExchangeRate::default());

        assert_eq!(balance_of(&agg, "b").paid, Money::ZERO);
        assert_eq!(balance_of(&agg, "c").owed, huge());
        assert_eq!(agg.expense_totals.len(), 1);
        assert!(matches!(
            agg.warnings.as_slice(),
            [SettlementWarning::SkippedExpense { .. }]
        ));
    }

    #[test]
    fn test_extreme_stored_total_is_reported() {
        let mut e = expense(
            "a",
            Currency::Primary,
            vec![ExpenseItem::new("Museum", huge(), ids(&["a"]))],
        );
        e.total_amount = Some(-huge());
        let agg = aggregate(&[e], &roster(), ExchangeRate::default());

        assert_eq!(balance_of(&agg, "a").paid, huge());
        assert!(matches!(
            agg.warnings.as_slice(),
            [SettlementWarning::TotalMismatch { .. }]
        ));
    }
}
