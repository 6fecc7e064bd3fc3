//! Service layer for tripsplit
//!
//! Business logic on top of the storage layer: validation at the input
//! boundary, roster and expense management, and settlement planning.

pub mod expense;
pub mod member;
pub mod settlement;

pub use expense::{ExpenseService, NewExpense};
pub use member::MemberService;
pub use settlement::{SettlementReport, SettlementService};
