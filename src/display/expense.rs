//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::models::{Currency, Expense, Member, MemberId, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Paid by")]
    payer: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn name_of(roster: &[Member], id: &MemberId) -> String {
    roster
        .iter()
        .find(|m| &m.id == id)
        .map(|m| m.display_name.clone())
        .unwrap_or_else(|| format!("{} (unknown)", id))
}

fn format_total(expense: &Expense, settings: &Settings) -> String {
    match expense.item_sum() {
        Some(total) => format_amount(total, &expense.currency, settings),
        None => "overflow".to_string(),
    }
}

fn format_amount(amount: Money, currency: &Currency, settings: &Settings) -> String {
    match currency {
        Currency::Primary => amount.format_with_symbol(&settings.primary.symbol),
        Currency::Secondary => amount.format_with_symbol(&settings.secondary.symbol),
        Currency::Unrecognized(tag) => format!("{} {}", amount, tag),
    }
}

/// Format a list of expenses as a table
pub fn format_expense_list(expenses: &[Expense], roster: &[Member], settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.created_at.format(&settings.date_format).to_string(),
        title: e.title.clone(),
        payer: name_of(roster, &e.payer_id),
        amount: format_total(e, settings),
        status: if e.is_settled { "Settled" } else { "" }.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single expense with its items
pub fn format_expense_details(expense: &Expense, roster: &[Member], settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.title));
    output.push_str(&format!("  ID:       {}\n", expense.id));
    output.push_str(&format!("  Paid by:  {}\n", name_of(roster, &expense.payer_id)));
    output.push_str(&format!(
        "  Currency: {}\n",
        settings.label_for(&expense.currency)
    ));
    output.push_str(&format!(
        "  Total:    {}",
        format_total(expense, settings)
    ));
    if let (Currency::Secondary, Some(total)) = (&expense.currency, expense.total_amount) {
        output.push_str(&format!(" (= {})", total.format_with_symbol(settings.settlement_symbol())));
    }
    output.push('\n');
    output.push_str(&format!(
        "  Settled:  {}\n",
        if expense.is_settled { "Yes" } else { "No" }
    ));
    output.push_str(&format!(
        "  Created:  {}\n",
        expense.created_at.format(&settings.date_format)
    ));

    output.push_str("  Items:\n");
    for item in &expense.items {
        let names: Vec<String> = item
            .participant_ids
            .iter()
            .map(|id| name_of(roster, id))
            .collect();
        let shared_by = if names.is_empty() {
            "nobody (not split)".to_string()
        } else {
            names.join(", ")
        };
        output.push_str(&format!(
            "    - {}: {} shared by {}\n",
            item.label,
            format_amount(item.amount, &expense.currency, settings),
            shared_by
        ));
    }

    output
}
