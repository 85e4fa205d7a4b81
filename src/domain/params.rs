//! Strategy and tax input parameters.
//!
//! Both parameter sets are plain immutable data. Each carries a `validate`
//! method that the engine calls before doing any arithmetic, so a caller that
//! skipped its own range checks still gets a descriptive error naming the
//! offending field instead of a nonsense series.

use super::error::TradeGrowthError;

/// Upper bound on `trading_days`; one record is allocated per day.
pub const MAX_TRADING_DAYS: u32 = 10_000;
/// Upper bound on `trading_days * trades_per_day`, the number of loop steps.
pub const MAX_TOTAL_TRADES: u64 = 1_000_000;

/// Inputs for the growth projector.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct StrategyParams {
    pub initial_investment: f64,
    /// Percentage applied per trade, e.g. `2.0` for 2%.
    pub percentage_gain_per_trade: f64,
    pub trading_days: u32,
    pub trades_per_day: u32,
    pub reinvest: bool,
}

impl StrategyParams {
    pub fn validate(&self) -> Result<(), TradeGrowthError> {
        if !self.initial_investment.is_finite() || self.initial_investment <= 0.0 {
            return Err(TradeGrowthError::invalid(
                "initial_investment",
                format!("must be a positive amount, got {}", self.initial_investment),
            ));
        }
        require_percentage("percentage_gain_per_trade", self.percentage_gain_per_trade)?;
        if self.trading_days < 1 {
            return Err(TradeGrowthError::invalid(
                "trading_days",
                "must be at least 1",
            ));
        }
        if self.trading_days > MAX_TRADING_DAYS {
            return Err(TradeGrowthError::invalid(
                "trading_days",
                format!("must be at most {MAX_TRADING_DAYS}, got {}", self.trading_days),
            ));
        }
        if self.trades_per_day < 1 {
            return Err(TradeGrowthError::invalid(
                "trades_per_day",
                "must be at least 1",
            ));
        }
        if self.total_trades() > MAX_TOTAL_TRADES {
            return Err(TradeGrowthError::invalid(
                "trades_per_day",
                format!(
                    "total trades must be at most {MAX_TOTAL_TRADES}, got {}",
                    self.total_trades()
                ),
            ));
        }
        Ok(())
    }

    /// Multiplier applied to the running amount by a single trade.
    pub fn trade_factor(&self) -> f64 {
        1.0 + self.percentage_gain_per_trade / 100.0
    }

    pub fn total_trades(&self) -> u64 {
        u64::from(self.trading_days) * u64::from(self.trades_per_day)
    }
}

/// Holding-period classification for the federal tax line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(rename_all = "snake_case"))]
pub enum GainType {
    #[default]
    ShortTerm,
    LongTerm,
}

impl GainType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "short_term" | "short" => Some(GainType::ShortTerm),
            "long_term" | "long" => Some(GainType::LongTerm),
            _ => None,
        }
    }
}

impl std::fmt::Display for GainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GainType::ShortTerm => write!(f, "short_term"),
            GainType::LongTerm => write!(f, "long_term"),
        }
    }
}

/// Inputs for the tax calculator. All rates are percentages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct TaxParams {
    pub federal_rate: f64,
    pub state_rate: f64,
    pub deductions: f64,
    pub gain_type: GainType,
    /// Replaces `federal_rate` on the federal line when `gain_type` is `LongTerm`.
    pub long_term_rate: f64,
}

impl TaxParams {
    pub fn validate(&self) -> Result<(), TradeGrowthError> {
        require_percentage("federal_rate", self.federal_rate)?;
        require_percentage("state_rate", self.state_rate)?;
        require_percentage("long_term_rate", self.long_term_rate)?;
        if !self.deductions.is_finite() || self.deductions < 0.0 {
            return Err(TradeGrowthError::invalid(
                "deductions",
                format!("must be non-negative, got {}", self.deductions),
            ));
        }
        Ok(())
    }
}

fn require_percentage(field: &str, value: f64) -> Result<(), TradeGrowthError> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(TradeGrowthError::invalid(
            field,
            format!("must be a percentage between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}
