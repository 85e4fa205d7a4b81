//! Plain-text rendering of an estimate for the terminal.
//!
//! Provides functions to format:
//! - Headline figures (initial investment, final amount, profit, return)
//! - Day-by-day growth table
//! - Tax breakdown
//! - Strategy summary paragraph

use crate::domain::estimate::Estimate;
use crate::domain::projection::ProjectionResult;
use crate::domain::tax::{FederalLine, TaxBreakdown};

/// Format an amount as dollars with thousands separators, e.g. `$1,234.56`.
pub fn format_currency(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn federal_label(line: &FederalLine) -> String {
    match line {
        FederalLine::Ordinary { rate } => format!("Federal Tax ({rate}%)"),
        FederalLine::LongTerm { rate } => format!("Long-term Capital Gains Tax ({rate}%)"),
    }
}

pub fn render_headline(projection: &ProjectionResult) -> String {
    let rows = [
        ("Initial Investment", format_currency(projection.initial_investment)),
        ("Final Amount", format_currency(projection.final_amount)),
        ("Total Profit", format_currency(projection.total_profit)),
        ("Total Return", format_percent(projection.percentage_return)),
    ];
    render_rows(&rows)
}

pub fn render_day_table(projection: &ProjectionResult) -> String {
    let mut out = format!("{:>5}  {:>16}  {:>14}\n", "Day", "Amount", "Daily Gain");
    for r in &projection.records {
        out.push_str(&format!(
            "{:>5}  {:>16}  {:>14}\n",
            r.day,
            format_currency(r.amount),
            format_currency(r.daily_gain)
        ));
    }
    out
}

pub fn render_tax_breakdown(tax: &TaxBreakdown) -> String {
    let rows = [
        ("Gross Profit".to_string(), format_currency(tax.gross_profit)),
        ("Tax Deductions".to_string(), format_currency(tax.deductions)),
        ("Taxable Profit".to_string(), format_currency(tax.taxable_profit)),
        (federal_label(&tax.federal_line), format_currency(tax.federal_tax)),
        (
            format!("State Tax ({}%)", tax.state_rate),
            format_currency(tax.state_tax),
        ),
        ("Total Tax".to_string(), format_currency(tax.total_tax)),
        ("Net Profit".to_string(), format_currency(tax.net_profit)),
    ];
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{k:<width$}  {v:>14}\n"))
        .collect()
}

pub fn render_strategy_summary(estimate: &Estimate) -> String {
    let s = &estimate.strategy;
    let p = &estimate.projection;
    let mut out = String::new();
    out.push_str(&format!("Type:                    {}\n", estimate.summary.mode.label()));
    out.push_str(&format!(
        "Initial Investment:      {}\n",
        format_currency(s.initial_investment)
    ));
    out.push_str(&format!(
        "Target Gain per Trade:   {}%\n",
        s.percentage_gain_per_trade
    ));
    out.push_str(&format!("Trades per Day:          {}\n", s.trades_per_day));
    out.push_str(&format!("Trading Days:            {}\n", s.trading_days));
    out.push_str(&format!(
        "Total Trades:            {}\n\n",
        estimate.summary.total_trades
    ));
    out.push_str(&format!(
        "This strategy turns {} into {} in {} trading days, a gross profit of {} ({} return).\n",
        format_currency(s.initial_investment),
        format_currency(p.final_amount),
        s.trading_days,
        format_currency(p.total_profit),
        format_percent(p.percentage_return),
    ));
    if let Some(tax) = &estimate.tax {
        out.push_str(&format!(
            "After taxes and deductions the net profit is {}.\n",
            format_currency(tax.net_profit)
        ));
    }
    out
}

/// Full console report: headline, growth table, tax breakdown and summary.
pub fn render(estimate: &Estimate) -> String {
    let mut out = String::new();
    out.push_str("=== Results ===\n");
    out.push_str(&render_headline(&estimate.projection));
    out.push_str("\n=== Growth Projection ===\n");
    out.push_str(&render_day_table(&estimate.projection));
    if let Some(tax) = &estimate.tax {
        out.push_str("\n=== Tax Breakdown ===\n");
        out.push_str(&render_tax_breakdown(tax));
    }
    out.push_str("\n=== Strategy Summary ===\n");
    out.push_str(&render_strategy_summary(estimate));
    out
}

fn render_rows(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{k:<width$}  {v:>14}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimate::estimate;
    use crate::domain::params::{GainType, StrategyParams, TaxParams};

    fn sample_estimate(gain_type: GainType) -> Estimate {
        let strategy = StrategyParams {
            initial_investment: 1000.0,
            percentage_gain_per_trade: 2.0,
            trading_days: 10,
            trades_per_day: 1,
            reinvest: true,
        };
        let tax = TaxParams {
            federal_rate: 22.0,
            state_rate: 5.0,
            deductions: 0.0,
            gain_type,
            long_term_rate: 15.0,
        };
        estimate(&strategy, Some(&tax)).unwrap()
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.994), "$999.99");
        assert_eq!(format_currency(1218.994_419), "$1,218.99");
        assert_eq!(format_currency(1_234_567.5), "$1,234,567.50");
    }

    #[test]
    fn currency_negative_sign() {
        assert_eq!(format_currency(-50.0), "-$50.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn percent_two_decimals() {
        assert_eq!(format_percent(21.899_441), "21.90%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn headline_contains_figures() {
        let est = sample_estimate(GainType::ShortTerm);
        let text = render_headline(&est.projection);
        assert!(text.contains("$1,000.00"));
        assert!(text.contains("$1,218.99"));
        assert!(text.contains("$218.99"));
        assert!(text.contains("21.90%"));
    }

    #[test]
    fn day_table_has_row_per_day() {
        let est = sample_estimate(GainType::ShortTerm);
        let table = render_day_table(&est.projection);
        assert_eq!(table.lines().count(), 11);
        assert!(table.lines().nth(1).unwrap().contains("$1,020.00"));
    }

    #[test]
    fn tax_breakdown_labels_federal_line() {
        let est = sample_estimate(GainType::ShortTerm);
        let text = render_tax_breakdown(est.tax.as_ref().unwrap());
        assert!(text.contains("Federal Tax (22%)"));
        assert!(text.contains("State Tax (5%)"));
        assert!(text.contains("$48.18"));
        assert!(text.contains("$59.13"));
    }

    #[test]
    fn tax_breakdown_labels_long_term_line() {
        let est = sample_estimate(GainType::LongTerm);
        let text = render_tax_breakdown(est.tax.as_ref().unwrap());
        assert!(text.contains("Long-term Capital Gains Tax (15%)"));
        assert!(!text.contains("Federal Tax"));
    }

    #[test]
    fn full_render_sections() {
        let est = sample_estimate(GainType::ShortTerm);
        let text = render(&est);
        assert!(text.contains("=== Results ==="));
        assert!(text.contains("=== Growth Projection ==="));
        assert!(text.contains("=== Tax Breakdown ==="));
        assert!(text.contains("Compounding (Reinvesting)"));
        assert!(text.contains("net profit is $159.87"));
    }

    #[test]
    fn render_without_tax_omits_breakdown() {
        let mut est = sample_estimate(GainType::ShortTerm);
        est.tax = None;
        let text = render(&est);
        assert!(!text.contains("=== Tax Breakdown ==="));
        assert!(!text.contains("net profit"));
    }
}
