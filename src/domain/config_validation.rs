//! Guardrail validation for user-supplied parameters.
//!
//! The engine only rejects values outside their mathematical domain. The
//! ranges here are the narrower limits the calculator offers its users, and
//! are reported against the config section/key the value came from.

use std::ops::RangeInclusive;

use crate::domain::error::TradeGrowthError;
use crate::domain::params::{GainType, StrategyParams, TaxParams};
use crate::ports::config_port::ConfigPort;

pub const MIN_INITIAL_INVESTMENT: f64 = 1.0;
pub const GAIN_PER_TRADE_RANGE: RangeInclusive<f64> = 0.1..=10.0;
pub const TRADING_DAYS_RANGE: RangeInclusive<u32> = 1..=22;
pub const TRADES_PER_DAY_RANGE: RangeInclusive<u32> = 1..=10;
pub const FEDERAL_RATE_RANGE: RangeInclusive<f64> = 0.0..=50.0;
pub const STATE_RATE_RANGE: RangeInclusive<f64> = 0.0..=20.0;
pub const LONG_TERM_RATE_RANGE: RangeInclusive<f64> = 0.0..=30.0;

const STRATEGY_NUMERIC_KEYS: [&str; 2] = ["initial_investment", "percentage_gain_per_trade"];
const STRATEGY_COUNT_KEYS: [&str; 2] = ["trading_days", "trades_per_day"];
const TAX_NUMERIC_KEYS: [&str; 4] = ["federal_rate", "state_rate", "deductions", "long_term_rate"];

/// Check that every key present in the config file is well-formed. Missing
/// keys are fine; they fall back to defaults.
pub fn validate_config_file(config: &dyn ConfigPort) -> Result<(), TradeGrowthError> {
    for key in STRATEGY_NUMERIC_KEYS {
        validate_number(config, "strategy", key)?;
    }
    for key in STRATEGY_COUNT_KEYS {
        validate_count(config, "strategy", key)?;
    }
    validate_boolean(config, "strategy", "reinvest")?;

    for key in TAX_NUMERIC_KEYS {
        validate_number(config, "tax", key)?;
    }
    validate_boolean(config, "tax", "enabled")?;
    if let Some(raw) = present_value(config, "tax", "gain_type")? {
        if GainType::parse(&raw).is_none() {
            return Err(invalid(
                "tax",
                "gain_type",
                format!("expected short_term or long_term, got '{raw}'"),
            ));
        }
    }

    for key in ["csv_path", "chart_path"] {
        present_value(config, "report", key)?;
    }
    Ok(())
}

pub fn validate_strategy_params(params: &StrategyParams) -> Result<(), TradeGrowthError> {
    if !(params.initial_investment >= MIN_INITIAL_INVESTMENT) {
        return Err(invalid(
            "strategy",
            "initial_investment",
            format!("initial_investment must be at least {MIN_INITIAL_INVESTMENT:.2}"),
        ));
    }
    check_range(
        "strategy",
        "percentage_gain_per_trade",
        params.percentage_gain_per_trade,
        &GAIN_PER_TRADE_RANGE,
    )?;
    if !TRADING_DAYS_RANGE.contains(&params.trading_days) {
        return Err(invalid(
            "strategy",
            "trading_days",
            format!(
                "trading_days must be between {} and {}",
                TRADING_DAYS_RANGE.start(),
                TRADING_DAYS_RANGE.end()
            ),
        ));
    }
    if !TRADES_PER_DAY_RANGE.contains(&params.trades_per_day) {
        return Err(invalid(
            "strategy",
            "trades_per_day",
            format!(
                "trades_per_day must be between {} and {}",
                TRADES_PER_DAY_RANGE.start(),
                TRADES_PER_DAY_RANGE.end()
            ),
        ));
    }
    Ok(())
}

pub fn validate_tax_params(params: &TaxParams) -> Result<(), TradeGrowthError> {
    check_range("tax", "federal_rate", params.federal_rate, &FEDERAL_RATE_RANGE)?;
    check_range("tax", "state_rate", params.state_rate, &STATE_RATE_RANGE)?;
    if params.gain_type == GainType::LongTerm {
        check_range(
            "tax",
            "long_term_rate",
            params.long_term_rate,
            &LONG_TERM_RATE_RANGE,
        )?;
    }
    if !(params.deductions >= 0.0) {
        return Err(invalid(
            "tax",
            "deductions",
            "deductions must be non-negative".to_string(),
        ));
    }
    Ok(())
}

fn check_range(
    section: &str,
    key: &str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), TradeGrowthError> {
    if !range.contains(&value) {
        return Err(invalid(
            section,
            key,
            format!("{key} must be between {} and {}", range.start(), range.end()),
        ));
    }
    Ok(())
}

/// A key written with no value (`trading_days =`) is reported as missing
/// rather than silently falling back to its default.
fn present_value(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<String>, TradeGrowthError> {
    match config.get_string(section, key) {
        Some(raw) if raw.trim().is_empty() => Err(TradeGrowthError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
        other => Ok(other),
    }
}

fn validate_number(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), TradeGrowthError> {
    match present_value(config, section, key)? {
        Some(raw) if raw.trim().parse::<f64>().is_err() => Err(invalid(
            section,
            key,
            format!("expected a number, got '{raw}'"),
        )),
        _ => Ok(()),
    }
}

fn validate_count(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), TradeGrowthError> {
    match present_value(config, section, key)? {
        Some(raw) if raw.trim().parse::<i64>().is_err() => Err(invalid(
            section,
            key,
            format!("expected a whole number, got '{raw}'"),
        )),
        _ => Ok(()),
    }
}

fn validate_boolean(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), TradeGrowthError> {
    let Some(raw) = present_value(config, section, key)? else {
        return Ok(());
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "false" | "no" | "0" => Ok(()),
        _ => Err(invalid(
            section,
            key,
            format!("expected true or false, got '{raw}'"),
        )),
    }
}

fn invalid(section: &str, key: &str, reason: String) -> TradeGrowthError {
    TradeGrowthError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}
