//! Settle CLI command
//!
//! Computes the settlement plan and prints it as a table, or exports it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::display::{format_settlement, format_warnings};
use crate::error::{TripError, TripResult};
use crate::export::{
    export_settlement_csv, export_settlement_json, export_settlement_yaml, ExportFormat,
};
use crate::services::{SettlementReport, SettlementService};
use crate::storage::Storage;

/// Arguments for `tripsplit settle`
#[derive(Args)]
pub struct SettleArgs {
    /// Output format (table, csv, json, yaml)
    #[arg(short, long, default_value = "table")]
    pub format: String,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the settle command
pub fn handle_settle_command(
    storage: &Storage,
    settings: &Settings,
    args: SettleArgs,
) -> TripResult<()> {
    let format: ExportFormat = args.format.parse().map_err(TripError::Validation)?;
    let report = SettlementService::new(storage, settings.exchange_rate).compute()?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TripError::Export(format!("Failed to create '{}': {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, settings, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| TripError::Export(e.to_string()))?;
            println!("Settlement plan written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(&report, settings, format, &mut handle)?;
        }
    }

    // Machine-readable output stays clean; the notice goes to stderr
    let printed_inline = format == ExportFormat::Table && args.output.is_none();
    if !printed_inline && report.settlement.has_warnings() {
        eprint!("{}", format_warnings(&report));
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &SettlementReport,
    settings: &Settings,
    format: ExportFormat,
    writer: &mut W,
) -> TripResult<()> {
    let code = &settings.primary.code;
    match format {
        ExportFormat::Table => {
            let text = format_settlement(report, settings.settlement_symbol());
            writer
                .write_all(text.as_bytes())
                .map_err(|e| TripError::Export(e.to_string()))
        }
        ExportFormat::Csv => export_settlement_csv(report, code, writer),
        ExportFormat::Json => export_settlement_json(report, code, writer),
        ExportFormat::Yaml => export_settlement_yaml(report, code, writer),
    }
}
