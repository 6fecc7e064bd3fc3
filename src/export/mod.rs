//! Export of settlement plans
//!
//! - CSV: one row per transfer (spreadsheet-compatible)
//! - JSON / YAML: the full plan with balances and warnings

pub mod csv;
pub mod json;
pub mod yaml;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::str::FromStr;

use crate::services::SettlementReport;

pub use self::csv::export_settlement_csv;
pub use self::json::export_settlement_json;
pub use self::yaml::export_settlement_yaml;

/// Output format for `tripsplit settle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "Unknown format '{}'. Valid formats: table, csv, json, yaml",
                other
            )),
        }
    }
}

/// A member's balance with names resolved and amounts rounded
#[derive(Debug, Clone, Serialize)]
pub struct BalanceExport {
    pub member_id: String,
    pub name: String,
    pub paid: f64,
    pub owed: f64,
    pub net: f64,
}

/// A transfer with names resolved and the amount rounded
#[derive(Debug, Clone, Serialize)]
pub struct TransferExport {
    pub from_id: String,
    pub from: String,
    pub to_id: String,
    pub to: String,
    pub amount: f64,
}

/// Serializable view of a settlement plan
#[derive(Debug, Clone, Serialize)]
pub struct SettlementExport {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub total_outstanding: f64,
    pub balances: Vec<BalanceExport>,
    pub transfers: Vec<TransferExport>,
    pub skipped_expenses: usize,
    pub warnings: Vec<String>,
}

impl SettlementExport {
    pub fn from_report(report: &SettlementReport, currency_code: &str) -> Self {
        let settlement = &report.settlement;
        Self {
            generated_at: Utc::now(),
            currency: currency_code.to_string(),
            total_outstanding: settlement.total_outstanding.to_f64_rounded(),
            balances: settlement
                .balances
                .iter()
                .map(|b| BalanceExport {
                    member_id: b.member_id.to_string(),
                    name: report.name_of(&b.member_id),
                    paid: b.paid.to_f64_rounded(),
                    owed: b.owed.to_f64_rounded(),
                    net: b.net().to_f64_rounded(),
                })
                .collect(),
            transfers: settlement
                .transfers
                .iter()
                .map(|t| TransferExport {
                    from_id: t.from.to_string(),
                    from: report.name_of(&t.from),
                    to_id: t.to.to_string(),
                    to: report.name_of(&t.to),
                    amount: t.amount.to_f64_rounded(),
                })
                .collect(),
            skipped_expenses: settlement.skipped_count(),
            warnings: settlement.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }
}
