//! YAML export of the full settlement plan

use std::io::Write;

use crate::error::{TripError, TripResult};
use crate::services::SettlementReport;

use super::SettlementExport;

/// Write the plan as YAML
pub fn export_settlement_yaml<W: Write>(
    report: &SettlementReport,
    currency_code: &str,
    writer: W,
) -> TripResult<()> {
    let export = SettlementExport::from_report(report, currency_code);
    serde_yaml::to_writer(writer, &export).map_err(|e| TripError::Export(e.to_string()))
}
