//! Settlement service
//!
//! Pulls a fresh snapshot from a [`TripLedger`] and runs the settlement
//! computation on it. Nothing is cached; every call recomputes.

use tracing::debug;

use crate::error::TripResult;
use crate::models::{ExchangeRate, Member, MemberId};
use crate::ports::TripLedger;
use crate::settlement::{compute_settlement, Settlement};

/// Settlement plan together with the roster it was computed for
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub settlement: Settlement,
    pub roster: Vec<Member>,
}

impl SettlementReport {
    /// Display name for a member id, falling back to the raw id
    pub fn name_of(&self, id: &MemberId) -> String {
        self.roster
            .iter()
            .find(|m| &m.id == id)
            .map(|m| m.display_name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

pub struct SettlementService<'a, L: TripLedger> {
    ledger: &'a L,
    rate: ExchangeRate,
}

impl<'a, L: TripLedger> SettlementService<'a, L> {
    pub fn new(ledger: &'a L, rate: ExchangeRate) -> Self {
        Self { ledger, rate }
    }

    /// Compute the current settlement plan
    pub fn compute(&self) -> TripResult<SettlementReport> {
        let expenses = self.ledger.list_active_expenses()?;
        let roster = self.ledger.list_roster_members()?;

        let settlement = compute_settlement(&expenses, &roster, self.rate);
        for warning in &settlement.warnings {
            debug!(%warning, "settlement data problem");
        }

        Ok(SettlementReport { settlement, roster })
    }
}
