//! tripsplit - settle up shared expenses after a group trip
//!
//! Members pay for things in either of two currencies and split each line
//! item between some of the group. This library turns that expense list
//! into per-member balances and a short list of transfers that squares
//! everyone up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (money, currencies, members, expenses)
//! - `settlement`: The settlement computation (normalize, aggregate, net, match)
//! - `ports`: The read interface the computation is fed through
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `config`: Configuration and path management
//! - `display` / `export`: Terminal tables and CSV/JSON/YAML output
//! - `cli`: Command handlers
//! - `logging`: tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tripsplit::models::{Currency, Expense, ExchangeRate, ExpenseItem, Member, MemberId, Money};
//! use tripsplit::settlement::compute_settlement;
//!
//! let roster = vec![Member::new("a", "Ari"), Member::new("b", "Bo")];
//! let expenses = vec![Expense::new(
//!     "Lunch",
//!     MemberId::from("a"),
//!     Currency::Primary,
//!     vec![ExpenseItem::new(
//!         "Lunch",
//!         Money::from_units(40),
//!         vec![MemberId::from("a"), MemberId::from("b")],
//!     )],
//! )];
//!
//! let plan = compute_settlement(&expenses, &roster, ExchangeRate::default());
//! assert_eq!(plan.transfers.len(), 1);
//! assert_eq!(plan.transfers[0].amount.value(), Decimal::from(20));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod ports;
pub mod services;
pub mod settlement;
pub mod storage;

pub use error::TripError;
