//! Tax calculator: gross profit plus tax settings into a tax breakdown.

use super::error::TradeGrowthError;
use super::params::{GainType, TaxParams};

/// Which rate was applied on the federal line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FederalLine {
    Ordinary { rate: f64 },
    LongTerm { rate: f64 },
}

impl FederalLine {
    pub fn rate(&self) -> f64 {
        match self {
            FederalLine::Ordinary { rate } | FederalLine::LongTerm { rate } => *rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TaxBreakdown {
    pub gross_profit: f64,
    pub deductions: f64,
    pub taxable_profit: f64,
    pub federal_line: FederalLine,
    pub federal_tax: f64,
    pub state_rate: f64,
    pub state_tax: f64,
    pub total_tax: f64,
    /// Gross profit less total tax. Deductions only shrink the tax base.
    pub net_profit: f64,
}

/// Compute the tax owed on `total_profit`.
///
/// Taxable profit is floored at zero, so a loss is never taxed and passes
/// through unchanged as the net profit.
pub fn compute_tax(total_profit: f64, params: &TaxParams) -> Result<TaxBreakdown, TradeGrowthError> {
    if !total_profit.is_finite() {
        return Err(TradeGrowthError::invalid(
            "total_profit",
            format!("must be a finite amount, got {total_profit}"),
        ));
    }
    params.validate()?;

    let taxable_profit = (total_profit - params.deductions).max(0.0);

    let federal_line = match params.gain_type {
        GainType::LongTerm => FederalLine::LongTerm {
            rate: params.long_term_rate,
        },
        GainType::ShortTerm => FederalLine::Ordinary {
            rate: params.federal_rate,
        },
    };
    let federal_tax = taxable_profit * (federal_line.rate() / 100.0);
    let state_tax = taxable_profit * (params.state_rate / 100.0);
    let total_tax = federal_tax + state_tax;
    let net_profit = total_profit - total_tax;

    tracing::debug!(
        gain_type = %params.gain_type,
        taxable_profit,
        total_tax,
        net_profit,
        "tax computed"
    );

    Ok(TaxBreakdown {
        gross_profit: total_profit,
        deductions: params.deductions,
        taxable_profit,
        federal_line,
        federal_tax,
        state_rate: params.state_rate,
        state_tax,
        total_tax,
        net_profit,
    })
}
