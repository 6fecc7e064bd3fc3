//! Core data models for tripsplit
//!
//! Members, itemized expenses, money amounts and the two-currency model the
//! settlement computation works on.

pub mod currency;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;

pub use currency::{Currency, ExchangeRate, NormalizeError};
pub use expense::{Expense, ExpenseItem, ExpenseValidationError};
pub use ids::{ExpenseId, MemberId};
pub use member::{Member, MemberValidationError};
pub use money::{Money, MoneyParseError, SETTLEMENT_EPSILON};
