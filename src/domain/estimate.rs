//! Full estimate: projection followed by the optional tax stage.

use super::error::TradeGrowthError;
use super::params::{StrategyParams, TaxParams};
use super::projection::{self, ProjectionResult};
use super::tax::{self, TaxBreakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum GrowthMode {
    Compounding,
    Fixed,
}

impl GrowthMode {
    pub fn label(&self) -> &'static str {
        match self {
            GrowthMode::Compounding => "Compounding (Reinvesting)",
            GrowthMode::Fixed => "Fixed Investment",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StrategySummary {
    pub mode: GrowthMode,
    pub total_trades: u64,
}

impl StrategySummary {
    pub fn of(params: &StrategyParams) -> Self {
        Self {
            mode: if params.reinvest {
                GrowthMode::Compounding
            } else {
                GrowthMode::Fixed
            },
            total_trades: params.total_trades(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Estimate {
    pub strategy: StrategyParams,
    pub summary: StrategySummary,
    pub projection: ProjectionResult,
    pub tax: Option<TaxBreakdown>,
}

/// Project growth for `strategy` and, when `tax_params` is given, tax the
/// resulting profit. Both parameter sets are validated before anything runs.
pub fn estimate(
    strategy: &StrategyParams,
    tax_params: Option<&TaxParams>,
) -> Result<Estimate, TradeGrowthError> {
    if let Some(t) = tax_params {
        t.validate()?;
    }

    let projection = projection::project(strategy)?;
    let tax = tax_params
        .map(|t| tax::compute_tax(projection.total_profit, t))
        .transpose()?;

    Ok(Estimate {
        strategy: strategy.clone(),
        summary: StrategySummary::of(strategy),
        projection,
        tax,
    })
}
