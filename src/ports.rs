//! Read access the settlement computation needs from persistence
//!
//! Settlement code receives explicit snapshots through this trait instead of
//! reaching into storage, so it can be exercised without any backing store.

use crate::error::TripResult;
use crate::models::{Expense, Member};

/// Source of the current trip state
pub trait TripLedger {
    /// Expenses not yet marked settled
    fn list_active_expenses(&self) -> TripResult<Vec<Expense>>;

    /// Current roster, in join order
    fn list_roster_members(&self) -> TripResult<Vec<Member>>;
}

/// Fixed in-memory snapshot, handy for tests and one-off computations
#[derive(Debug, Clone, Default)]
pub struct SnapshotLedger {
    pub expenses: Vec<Expense>,
    pub members: Vec<Member>,
}

impl SnapshotLedger {
    pub fn new(members: Vec<Member>, expenses: Vec<Expense>) -> Self {
        Self { expenses, members }
    }
}

impl TripLedger for SnapshotLedger {
    fn list_active_expenses(&self) -> TripResult<Vec<Expense>> {
        Ok(self
            .expenses
            .iter()
            .filter(|e| !e.is_settled)
            .cloned()
            .collect())
    }

    fn list_roster_members(&self) -> TripResult<Vec<Member>> {
        Ok(self.members.clone())
    }
}
