//! Settlement plan display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::services::SettlementReport;

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Share")]
    owed: String,
    #[tabled(rename = "Net")]
    net: String,
}

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the full settlement report: balances, transfers and warnings
pub fn format_settlement(report: &SettlementReport, symbol: &str) -> String {
    let settlement = &report.settlement;
    let mut output = String::new();

    output.push_str(&format!(
        "Outstanding: {}\n\n",
        settlement.total_outstanding.format_with_symbol(symbol)
    ));

    if !settlement.balances.is_empty() {
        let rows = settlement.balances.iter().map(|b| BalanceRow {
            member: report.name_of(&b.member_id),
            paid: b.paid.format_with_symbol(symbol),
            owed: b.owed.format_with_symbol(symbol),
            net: b.net().format_with_symbol(symbol),
        });
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .modify(Columns::new(1..), Alignment::right());
        output.push_str(&format!("{}\n\n", table));
    }

    output.push_str(&format_transfers(report, symbol));

    if settlement.has_warnings() {
        output.push('\n');
        output.push_str(&format_warnings(report));
    }

    output
}

/// Format only the transfer list
pub fn format_transfers(report: &SettlementReport, symbol: &str) -> String {
    let settlement = &report.settlement;
    if settlement.is_settled_up() {
        return "Everyone is settled up.\n".to_string();
    }

    let rows = settlement.transfers.iter().map(|t| TransferRow {
        from: report.name_of(&t.from),
        to: report.name_of(&t.to),
        amount: t.amount.format_with_symbol(symbol),
    });
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(2), Alignment::right());
    format!("{}\n", table)
}

/// Non-blocking notice listing data problems
pub fn format_warnings(report: &SettlementReport) -> String {
    let settlement = &report.settlement;
    let mut output = format!(
        "Heads up: {} problem(s) found, {} expense(s) skipped:\n",
        settlement.warnings.len(),
        settlement.skipped_count()
    );
    for warning in &settlement.warnings {
        output.push_str(&format!("  ! {}\n", warning));
    }
    output
}
