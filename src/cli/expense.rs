//! Expense CLI commands
//!
//! Implements CLI commands for recording and settling expenses.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_list};
use crate::error::{TripError, TripResult};
use crate::models::{ExpenseItem, MemberId, Money};
use crate::services::{ExpenseService, MemberService, NewExpense};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the expense was for
        #[arg(short, long)]
        title: String,
        /// Member ID or name of whoever paid
        #[arg(short, long)]
        payer: String,
        /// Currency code or tag (e.g. USD, KRW, primary, secondary)
        #[arg(short, long, default_value = "primary")]
        currency: String,
        /// Line item as "label=amount:member,member" (omit members to split
        /// between everyone). Repeat for more items.
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,
    },
    /// List expenses
    List {
        /// Include settled expenses
        #[arg(short, long)]
        all: bool,
    },
    /// Show expense details
    Show {
        /// Expense ID or ID prefix
        expense: String,
    },
    /// Mark an expense as settled
    Settle {
        /// Expense ID or ID prefix
        expense: String,
    },
    /// Mark a settled expense as unsettled again
    Unsettle {
        /// Expense ID or ID prefix
        expense: String,
    },
    /// Flip an expense's settled flag
    Toggle {
        /// Expense ID or ID prefix
        expense: String,
    },
    /// Delete an expense
    Delete {
        /// Expense ID or ID prefix
        expense: String,
    },
}

/// A parsed `--item` argument, before member names are resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpec {
    pub label: String,
    pub amount: Money,
    /// `None` means everyone on the roster
    pub participants: Option<Vec<String>>,
}

/// Parse `label=amount[:member,member...]`
pub fn parse_item_spec(spec: &str) -> TripResult<ItemSpec> {
    let (label, rest) = spec.split_once('=').ok_or_else(|| {
        TripError::Validation(format!(
            "Invalid item '{}'. Use format like 'Dinner=45.00:ana,ben'",
            spec
        ))
    })?;

    let (amount_text, members_text) = match rest.split_once(':') {
        Some((amount, members)) => (amount, Some(members)),
        None => (rest, None),
    };

    let amount = Money::parse(amount_text).map_err(|e| {
        TripError::Validation(format!(
            "Invalid amount '{}' for item '{}': {}",
            amount_text.trim(),
            label.trim(),
            e
        ))
    })?;

    let participants = members_text
        .map(|text| {
            text.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .filter(|members| !members.is_empty());

    Ok(ItemSpec {
        label: label.trim().to_string(),
        amount,
        participants,
    })
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TripResult<()> {
    let service = ExpenseService::new(storage, settings);
    let members = MemberService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            title,
            payer,
            currency,
            items,
        } => {
            let payer = members.resolve(&payer)?;
            let currency = settings.parse_currency(&currency);
            if !currency.is_recognized() {
                return Err(TripError::Validation(format!(
                    "Unknown currency '{}'. Use {} or {}",
                    currency, settings.primary.code, settings.secondary.code
                )));
            }

            let roster: Vec<MemberId> = members.list()?.into_iter().map(|m| m.id).collect();
            let mut expense_items = Vec::with_capacity(items.len());
            for spec in &items {
                let parsed = parse_item_spec(spec)?;
                let participant_ids = match parsed.participants {
                    Some(names) => names
                        .iter()
                        .map(|name| members.resolve(name).map(|m| m.id))
                        .collect::<TripResult<Vec<_>>>()?,
                    None => roster.clone(),
                };
                expense_items.push(ExpenseItem::new(parsed.label, parsed.amount, participant_ids));
            }

            let expense = service.create(NewExpense {
                title,
                payer_id: payer.id,
                currency,
                items: expense_items,
            })?;

            println!("Recorded expense: {}", expense.title);
            println!("  Paid by: {}", payer.display_name);
            if let Some(total) = expense.total_amount {
                println!(
                    "  Total: {}",
                    total.format_with_symbol(settings.settlement_symbol())
                );
            }
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List { all } => {
            let expenses = service.list(all)?;
            let roster = members.list()?;
            print!("{}", format_expense_list(&expenses, &roster, settings));
        }

        ExpenseCommands::Show { expense } => {
            let found = service.find(&expense)?;
            let roster = members.list()?;
            print!("{}", format_expense_details(&found, &roster, settings));
        }

        ExpenseCommands::Settle { expense } => {
            let found = service.find(&expense)?;
            let updated = service.set_settled(found.id, true)?;
            println!("Settled expense: {}", updated.title);
        }

        ExpenseCommands::Unsettle { expense } => {
            let found = service.find(&expense)?;
            let updated = service.set_settled(found.id, false)?;
            println!("Unsettled expense: {}", updated.title);
        }

        ExpenseCommands::Toggle { expense } => {
            let found = service.find(&expense)?;
            let updated = service.toggle_settled(found.id)?;
            let state = if updated.is_settled { "settled" } else { "unsettled" };
            println!("Expense '{}' is now {}", updated.title, state);
        }

        ExpenseCommands::Delete { expense } => {
            let found = service.find(&expense)?;
            let deleted = service.delete(found.id)?;
            println!("Deleted expense: {}", deleted.title);
        }
    }

    Ok(())
}
