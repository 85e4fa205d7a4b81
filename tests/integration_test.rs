//! Engine-level integration tests.
//!
//! Tests cover:
//! - Worked scenarios for both growth modes and both tax treatments
//! - Universal properties of the projector (closed forms, monotonicity, purity)
//! - Universal properties of the tax calculator (clamp, rate exclusivity)
//! - Combined estimate with and without the tax stage

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use tradegrowth::domain::error::TradeGrowthError;
use tradegrowth::domain::estimate::{estimate, GrowthMode};
use tradegrowth::domain::params::{GainType, StrategyParams, TaxParams};
use tradegrowth::domain::projection::project;
use tradegrowth::domain::tax::{compute_tax, FederalLine};

mod scenarios {
    use super::*;

    #[test]
    fn scenario_a_compounding() {
        let result = project(&scenario_a()).unwrap();
        assert_relative_eq!(result.final_amount, 1000.0 * 1.02_f64.powi(10), epsilon = 1e-9);
        assert!((result.final_amount - 1218.99).abs() < 0.005);
        assert!((result.total_profit - 218.99).abs() < 0.005);
    }

    #[test]
    fn scenario_b_flat() {
        let result = project(&scenario_b()).unwrap();
        assert_relative_eq!(result.records[9].amount, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(result.total_profit, 200.0, epsilon = 1e-9);
        assert_relative_eq!(result.percentage_return, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn scenario_c_tax_on_scenario_a_profit() {
        let profit = project(&scenario_a()).unwrap().total_profit;
        let tax = compute_tax(profit, &short_term_tax()).unwrap();
        assert!((tax.federal_tax - 48.18).abs() < 0.005);
        assert!((tax.state_tax - 10.95).abs() < 0.005);
        assert!((tax.total_tax - 59.13).abs() < 0.005);
        assert_relative_eq!(tax.net_profit, 159.865_926_596, epsilon = 1e-6);
    }

    #[test]
    fn scenario_d_loss() {
        let tax = compute_tax(-50.0, &short_term_tax()).unwrap();
        assert_eq!(tax.taxable_profit, 0.0);
        assert_eq!(tax.total_tax, 0.0);
        assert_eq!(tax.net_profit, -50.0);
    }

    #[test]
    fn scenario_d_loss_long_term() {
        let tax = compute_tax(-50.0, &long_term_tax()).unwrap();
        assert_eq!(tax.total_tax, 0.0);
        assert_eq!(tax.net_profit, -50.0);
    }

    #[test]
    fn maximum_guardrail_strategy() {
        let params = StrategyParams {
            initial_investment: 1_000_000.0,
            percentage_gain_per_trade: 10.0,
            trading_days: 22,
            trades_per_day: 10,
            reinvest: true,
        };
        let result = project(&params).unwrap();
        assert_eq!(result.records.len(), 22);
        assert!(result.final_amount.is_finite());
        assert_relative_eq!(
            result.final_amount,
            1_000_000.0 * 1.1_f64.powi(220),
            max_relative = 1e-9
        );
    }
}

mod estimate_pipeline {
    use super::*;

    #[test]
    fn estimate_combines_both_stages() {
        let est = estimate(&scenario_a(), Some(&short_term_tax())).unwrap();
        let tax = est.tax.as_ref().unwrap();
        assert_eq!(est.summary.mode, GrowthMode::Compounding);
        assert_eq!(est.summary.total_trades, 10);
        assert_relative_eq!(tax.gross_profit, est.projection.total_profit, epsilon = 1e-12);
        assert_relative_eq!(
            tax.net_profit,
            est.projection.total_profit - tax.total_tax,
            epsilon = 1e-12
        );
    }

    #[test]
    fn estimate_without_tax_matches_project() {
        let est = estimate(&scenario_b(), None).unwrap();
        assert_eq!(est.projection, project(&scenario_b()).unwrap());
        assert_eq!(est.summary.mode, GrowthMode::Fixed);
        assert!(est.tax.is_none());
    }

    #[test]
    fn zero_day_strategy_never_yields_empty_series() {
        let params = StrategyParams {
            trading_days: 0,
            ..scenario_a()
        };
        assert!(matches!(
            estimate(&params, None),
            Err(TradeGrowthError::InvalidParameter { .. })
        ));
    }

    #[cfg(feature = "json")]
    #[test]
    fn estimate_serializes_to_json() {
        let est = estimate(&scenario_a(), Some(&long_term_tax())).unwrap();
        let value = serde_json::to_value(&est).unwrap();
        assert_eq!(value["summary"]["mode"], "compounding");
        assert_eq!(value["strategy"]["trading_days"], 10);
        assert_eq!(value["projection"]["records"].as_array().unwrap().len(), 10);
        assert_eq!(value["tax"]["federal_line"]["kind"], "long_term");
        assert_eq!(value["tax"]["federal_line"]["rate"], 15.0);
    }
}

fn strategy_strategy() -> impl Strategy<Value = StrategyParams> {
    (1.0f64..1_000_000.0, 0.0f64..=10.0, 1u32..=22, 1u32..=10, any::<bool>()).prop_map(
        |(initial_investment, gain, trading_days, trades_per_day, reinvest)| StrategyParams {
            initial_investment,
            percentage_gain_per_trade: gain,
            trading_days,
            trades_per_day,
            reinvest,
        },
    )
}

fn tax_strategy() -> impl Strategy<Value = TaxParams> {
    (
        0.0f64..=50.0,
        0.0f64..=20.0,
        0.0f64..10_000.0,
        any::<bool>(),
        0.0f64..=30.0,
    )
        .prop_map(|(federal_rate, state_rate, deductions, long, long_term_rate)| TaxParams {
            federal_rate,
            state_rate,
            deductions,
            gain_type: if long {
                GainType::LongTerm
            } else {
                GainType::ShortTerm
            },
            long_term_rate,
        })
}

proptest! {
    #[test]
    fn series_length_matches_trading_days(params in strategy_strategy()) {
        let result = project(&params).unwrap();
        prop_assert_eq!(result.records.len(), params.trading_days as usize);
        for (i, r) in result.records.iter().enumerate() {
            prop_assert_eq!(r.day as usize, i + 1);
        }
    }

    #[test]
    fn amounts_never_decrease(params in strategy_strategy()) {
        let result = project(&params).unwrap();
        let mut prev = params.initial_investment;
        for r in &result.records {
            prop_assert!(r.amount >= prev);
            prop_assert!(r.daily_gain >= 0.0);
            prev = r.amount;
        }
    }

    #[test]
    fn compounding_matches_closed_form(params in strategy_strategy()) {
        let params = StrategyParams { reinvest: true, ..params };
        let result = project(&params).unwrap();
        let n = (params.trading_days * params.trades_per_day) as i32;
        let expected = params.initial_investment * params.trade_factor().powi(n);
        let tolerance = expected.abs() * 1e-9;
        prop_assert!((result.final_amount - expected).abs() <= tolerance);
    }

    #[test]
    fn flat_matches_closed_form(params in strategy_strategy()) {
        let params = StrategyParams { reinvest: false, ..params };
        let result = project(&params).unwrap();
        for r in &result.records {
            let expected = params.initial_investment
                + f64::from(r.day)
                    * f64::from(params.trades_per_day)
                    * params.initial_investment
                    * params.percentage_gain_per_trade
                    / 100.0;
            let tolerance = expected.abs() * 1e-9;
            prop_assert!((r.amount - expected).abs() <= tolerance);
        }
    }

    #[test]
    fn projection_is_pure(params in strategy_strategy()) {
        prop_assert_eq!(project(&params).unwrap(), project(&params).unwrap());
    }

    #[test]
    fn profit_below_deductions_is_untaxed(
        tax in tax_strategy(),
        shortfall in 0.01f64..10_000.0,
    ) {
        let profit = tax.deductions - shortfall;
        let breakdown = compute_tax(profit, &tax).unwrap();
        prop_assert_eq!(breakdown.taxable_profit, 0.0);
        prop_assert_eq!(breakdown.total_tax, 0.0);
        prop_assert_eq!(breakdown.net_profit, profit);
    }

    #[test]
    fn taxable_profit_never_negative(
        tax in tax_strategy(),
        profit in -100_000.0f64..100_000.0,
    ) {
        let breakdown = compute_tax(profit, &tax).unwrap();
        prop_assert!(breakdown.taxable_profit >= 0.0);
        prop_assert!(breakdown.total_tax >= 0.0);
    }

    #[test]
    fn federal_line_uses_exactly_one_rate(
        tax in tax_strategy(),
        profit in 0.0f64..100_000.0,
    ) {
        let breakdown = compute_tax(profit, &tax).unwrap();
        let (expected_rate, expected_line) = match tax.gain_type {
            GainType::LongTerm => (
                tax.long_term_rate,
                FederalLine::LongTerm { rate: tax.long_term_rate },
            ),
            GainType::ShortTerm => (
                tax.federal_rate,
                FederalLine::Ordinary { rate: tax.federal_rate },
            ),
        };
        prop_assert_eq!(breakdown.federal_line, expected_line);
        let expected = breakdown.taxable_profit * expected_rate / 100.0;
        prop_assert!((breakdown.federal_tax - expected).abs() <= 1e-9 * expected.max(1.0));
    }
}
