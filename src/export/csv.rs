//! CSV export of the transfer list

use std::io::Write;

use crate::error::{TripError, TripResult};
use crate::services::SettlementReport;

use super::SettlementExport;

/// Write one CSV row per transfer
pub fn export_settlement_csv<W: Write>(
    report: &SettlementReport,
    currency_code: &str,
    writer: W,
) -> TripResult<()> {
    let export = SettlementExport::from_report(report, currency_code);
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["From", "From ID", "To", "To ID", "Amount", "Currency"])
        .map_err(|e| TripError::Export(e.to_string()))?;

    for transfer in &export.transfers {
        csv_writer
            .write_record([
                transfer.from.as_str(),
                transfer.from_id.as_str(),
                transfer.to.as_str(),
                transfer.to_id.as_str(),
                &format!("{:.2}", transfer.amount),
                currency_code,
            ])
            .map_err(|e| TripError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| TripError::Export(e.to_string()))?;
    Ok(())
}
