//! Display formatting for terminal output
//!
//! Renders roster, expenses and settlement plans as text tables.

pub mod expense;
pub mod member;
pub mod settlement;

pub use expense::{format_expense_details, format_expense_list};
pub use member::format_member_list;
pub use settlement::{format_settlement, format_transfers, format_warnings};
