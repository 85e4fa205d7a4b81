#![allow(dead_code)]

use std::io::Write;
use tradegrowth::domain::params::{GainType, StrategyParams, TaxParams};

/// Scenario A inputs: $1000, 2% per trade, 10 days, 1 trade a day, compounding.
pub fn scenario_a() -> StrategyParams {
    StrategyParams {
        initial_investment: 1000.0,
        percentage_gain_per_trade: 2.0,
        trading_days: 10,
        trades_per_day: 1,
        reinvest: true,
    }
}

pub fn scenario_b() -> StrategyParams {
    StrategyParams {
        reinvest: false,
        ..scenario_a()
    }
}

pub fn short_term_tax() -> TaxParams {
    TaxParams {
        federal_rate: 22.0,
        state_rate: 5.0,
        deductions: 0.0,
        gain_type: GainType::ShortTerm,
        long_term_rate: 15.0,
    }
}

pub fn long_term_tax() -> TaxParams {
    TaxParams {
        gain_type: GainType::LongTerm,
        ..short_term_tax()
    }
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
