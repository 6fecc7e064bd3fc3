//! JSON export of the full settlement plan

use std::io::Write;

use crate::error::{TripError, TripResult};
use crate::services::SettlementReport;

use super::SettlementExport;

/// Write the plan as pretty-printed JSON
pub fn export_settlement_json<W: Write>(
    report: &SettlementReport,
    currency_code: &str,
    writer: &mut W,
) -> TripResult<()> {
    let export = SettlementExport::from_report(report, currency_code);
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| TripError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| TripError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::test_support::sample_report;

    #[test]
    fn test_json_export() {
        let mut buffer = Vec::new();
        export_settlement_json(&sample_report(), "USD", &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["total_outstanding"], 100.0);
        assert_eq!(value["transfers"].as_array().unwrap().len(), 2);
        assert_eq!(value["skipped_expenses"], 0);
    }
}
