//! Growth projector: turns strategy parameters into a day-by-day series.

use super::error::TradeGrowthError;
use super::params::StrategyParams;

/// One trading day of the projection.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DayRecord {
    pub day: u32,
    pub amount: f64,
    pub daily_gain: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ProjectionResult {
    pub records: Vec<DayRecord>,
    pub initial_investment: f64,
    pub final_amount: f64,
    pub total_profit: f64,
    /// Total profit as a percentage of the initial investment.
    pub percentage_return: f64,
}

impl ProjectionResult {
    /// Derive summary statistics from a finished day series.
    pub fn from_records(
        initial_investment: f64,
        records: Vec<DayRecord>,
    ) -> Result<Self, TradeGrowthError> {
        let final_amount = match records.last() {
            Some(r) => r.amount,
            None => {
                return Err(TradeGrowthError::ArithmeticDegenerate {
                    reason: "projection produced no trading days".into(),
                });
            }
        };
        if initial_investment <= 0.0 || !initial_investment.is_finite() {
            return Err(TradeGrowthError::ArithmeticDegenerate {
                reason: format!(
                    "cannot compute percentage return on initial investment {initial_investment}"
                ),
            });
        }

        let total_profit = final_amount - initial_investment;
        let percentage_return = total_profit / initial_investment * 100.0;
        if !final_amount.is_finite() || !total_profit.is_finite() || !percentage_return.is_finite()
        {
            return Err(TradeGrowthError::ArithmeticDegenerate {
                reason: format!("projected amount overflowed (final amount {final_amount})"),
            });
        }

        Ok(Self {
            records,
            initial_investment,
            final_amount,
            total_profit,
            percentage_return,
        })
    }

    pub fn amounts(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.amount)
    }
}

/// Run the growth projection for `params`.
///
/// Reinvest mode compounds every trade on the running amount, both within a
/// day and across days. Flat mode computes a fixed daily gain from the
/// initial investment and accumulates it linearly.
pub fn project(params: &StrategyParams) -> Result<ProjectionResult, TradeGrowthError> {
    params.validate()?;

    let records = if params.reinvest {
        compounding_series(params)
    } else {
        flat_series(params)
    };

    let result = ProjectionResult::from_records(params.initial_investment, records)?;
    tracing::debug!(
        reinvest = params.reinvest,
        trading_days = params.trading_days,
        trades_per_day = params.trades_per_day,
        final_amount = result.final_amount,
        total_profit = result.total_profit,
        "projection complete"
    );
    Ok(result)
}

fn compounding_series(params: &StrategyParams) -> Vec<DayRecord> {
    let factor = params.trade_factor();
    let mut current_amount = params.initial_investment;
    let mut records = Vec::with_capacity(params.trading_days as usize);

    for day in 1..=params.trading_days {
        let daily_start = current_amount;
        for _ in 0..params.trades_per_day {
            current_amount *= factor;
        }
        records.push(DayRecord {
            day,
            amount: current_amount,
            daily_gain: current_amount - daily_start,
        });
    }

    records
}

fn flat_series(params: &StrategyParams) -> Vec<DayRecord> {
    let trade_gain = params.initial_investment * (params.percentage_gain_per_trade / 100.0);
    let daily_gain = trade_gain * f64::from(params.trades_per_day);

    (1..=params.trading_days)
        .map(|day| DayRecord {
            day,
            amount: params.initial_investment + daily_gain * f64::from(day),
            daily_gain,
        })
        .collect()
}
