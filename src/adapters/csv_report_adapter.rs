//! CSV export of the day-by-day growth table.

use std::path::Path;

use crate::domain::error::TradeGrowthError;
use crate::domain::estimate::Estimate;
use crate::ports::report_port::ReportPort;

/// Writes `day,amount,daily_gain` rows. Amounts are raw numbers rounded to
/// cents; no currency symbols.
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    fn report_err(path: &Path, e: impl std::fmt::Display) -> TradeGrowthError {
        TradeGrowthError::Report {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, estimate: &Estimate, output_path: &Path) -> Result<(), TradeGrowthError> {
        let mut wtr =
            csv::Writer::from_path(output_path).map_err(|e| Self::report_err(output_path, e))?;

        wtr.write_record(["day", "amount", "daily_gain"])
            .map_err(|e| Self::report_err(output_path, e))?;

        for r in &estimate.projection.records {
            wtr.write_record([
                r.day.to_string(),
                format!("{:.2}", r.amount),
                format!("{:.2}", r.daily_gain),
            ])
            .map_err(|e| Self::report_err(output_path, e))?;
        }

        wtr.flush().map_err(|e| Self::report_err(output_path, e))?;
        tracing::info!(
            path = %output_path.display(),
            rows = estimate.projection.records.len(),
            "wrote growth table"
        );
        Ok(())
    }
}
