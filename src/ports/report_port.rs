//! Report output port trait.

use std::path::Path;

use crate::domain::error::TradeGrowthError;
use crate::domain::estimate::Estimate;

/// Port for writing a finished estimate to a file.
pub trait ReportPort {
    fn write(&self, estimate: &Estimate, output_path: &Path) -> Result<(), TradeGrowthError>;
}
