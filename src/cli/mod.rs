//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod config;
pub mod expense;
pub mod member;
pub mod settle;

pub use config::{handle_config_command, handle_init_command, ConfigArgs};
pub use expense::{handle_expense_command, parse_item_spec, ExpenseCommands, ItemSpec};
pub use member::{handle_member_command, MemberCommands};
pub use settle::{handle_settle_command, SettleArgs};
