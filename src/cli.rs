//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::console_report;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart_adapter::SvgChartAdapter;
use crate::domain::config_validation::{
    validate_config_file, validate_strategy_params, validate_tax_params,
};
use crate::domain::error::TradeGrowthError;
use crate::domain::estimate::{self, Estimate};
use crate::domain::params::{GainType, StrategyParams, TaxParams};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "tradegrowth",
    about = "Projected returns for a repeated percentage-gain trading strategy"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Project growth and, unless disabled, the tax owed on the profit
    Project(ProjectArgs),
    /// Validate a config file and print the resolved parameters
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Flags for `project`. Every flag overrides the matching config key.
#[derive(Args, Debug, Default, Clone)]
pub struct ProjectArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub initial_investment: Option<f64>,
    /// Percentage gain per trade, e.g. 2.0
    #[arg(long)]
    pub gain_per_trade: Option<f64>,
    #[arg(long)]
    pub trading_days: Option<u32>,
    #[arg(long)]
    pub trades_per_day: Option<u32>,
    #[arg(long, conflicts_with = "no_reinvest")]
    pub reinvest: bool,
    #[arg(long)]
    pub no_reinvest: bool,
    #[arg(long)]
    pub federal_rate: Option<f64>,
    #[arg(long)]
    pub state_rate: Option<f64>,
    #[arg(long)]
    pub deductions: Option<f64>,
    #[arg(long, conflicts_with = "long_term")]
    pub short_term: bool,
    #[arg(long)]
    pub long_term: bool,
    #[arg(long)]
    pub long_term_rate: Option<f64>,
    /// Skip the tax stage
    #[arg(long)]
    pub no_tax: bool,
    /// Write the day table as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,
    /// Write an SVG growth chart
    #[arg(long)]
    pub chart: Option<PathBuf>,
    /// Print the estimate as JSON instead of text
    #[cfg(feature = "json")]
    #[arg(long)]
    pub json: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Project(args) => run_project(&args),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, TradeGrowthError> {
    tracing::info!(path = %path.display(), "loading config");
    let config = FileConfigAdapter::from_file(path)?;
    for key in config.unknown_keys() {
        tracing::warn!(path = %path.display(), key = %key, "ignoring unknown config key");
    }
    Ok(config)
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, TradeGrowthError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// Resolve strategy parameters: flags first, then `[strategy]`, then the
/// calculator defaults.
pub fn build_strategy_params(
    config: &dyn ConfigPort,
    args: &ProjectArgs,
) -> Result<StrategyParams, TradeGrowthError> {
    let reinvest = if args.reinvest {
        true
    } else if args.no_reinvest {
        false
    } else {
        config.get_bool("strategy", "reinvest", true)
    };

    let trading_days = match args.trading_days {
        Some(d) => d,
        None => config.get_count("strategy", "trading_days", 10)?,
    };
    let trades_per_day = match args.trades_per_day {
        Some(t) => t,
        None => config.get_count("strategy", "trades_per_day", 1)?,
    };

    Ok(StrategyParams {
        initial_investment: args
            .initial_investment
            .unwrap_or_else(|| config.get_double("strategy", "initial_investment", 1000.0)),
        percentage_gain_per_trade: args.gain_per_trade.unwrap_or_else(|| {
            config.get_double("strategy", "percentage_gain_per_trade", 2.0)
        }),
        trading_days,
        trades_per_day,
        reinvest,
    })
}

/// Resolve tax parameters, or `None` when the tax stage is disabled.
pub fn build_tax_params(
    config: &dyn ConfigPort,
    args: &ProjectArgs,
) -> Result<Option<TaxParams>, TradeGrowthError> {
    if args.no_tax || !config.get_bool("tax", "enabled", true) {
        return Ok(None);
    }

    let gain_type = if args.long_term {
        GainType::LongTerm
    } else if args.short_term {
        GainType::ShortTerm
    } else {
        match config.get_string("tax", "gain_type") {
            Some(raw) => GainType::parse(&raw).ok_or_else(|| TradeGrowthError::ConfigInvalid {
                section: "tax".into(),
                key: "gain_type".into(),
                reason: format!("expected short_term or long_term, got '{raw}'"),
            })?,
            None => GainType::ShortTerm,
        }
    };

    Ok(Some(TaxParams {
        federal_rate: args
            .federal_rate
            .unwrap_or_else(|| config.get_double("tax", "federal_rate", 22.0)),
        state_rate: args
            .state_rate
            .unwrap_or_else(|| config.get_double("tax", "state_rate", 5.0)),
        deductions: args
            .deductions
            .unwrap_or_else(|| config.get_double("tax", "deductions", 0.0)),
        gain_type,
        long_term_rate: args
            .long_term_rate
            .unwrap_or_else(|| config.get_double("tax", "long_term_rate", 15.0)),
    }))
}

/// Output file paths: flags first, then `[report]`.
pub fn resolve_report_paths(
    config: &dyn ConfigPort,
    args: &ProjectArgs,
) -> (Option<PathBuf>, Option<PathBuf>) {
    let csv = args
        .csv
        .clone()
        .or_else(|| config.get_string("report", "csv_path").map(PathBuf::from));
    let chart = args
        .chart
        .clone()
        .or_else(|| config.get_string("report", "chart_path").map(PathBuf::from));
    (csv, chart)
}

/// The flag that supplied `key`, if one was given on the command line.
fn flag_for_key(args: &ProjectArgs, key: &str) -> Option<&'static str> {
    let (given, flag) = match key {
        "initial_investment" => (args.initial_investment.is_some(), "initial-investment"),
        "percentage_gain_per_trade" => (args.gain_per_trade.is_some(), "gain-per-trade"),
        "trading_days" => (args.trading_days.is_some(), "trading-days"),
        "trades_per_day" => (args.trades_per_day.is_some(), "trades-per-day"),
        "federal_rate" => (args.federal_rate.is_some(), "federal-rate"),
        "state_rate" => (args.state_rate.is_some(), "state-rate"),
        "deductions" => (args.deductions.is_some(), "deductions"),
        "long_term_rate" => (args.long_term_rate.is_some(), "long-term-rate"),
        _ => (false, ""),
    };
    given.then_some(flag)
}

/// Guardrail failures on flag values are reported against the flag rather
/// than a config key.
fn attribute_to_flag(err: TradeGrowthError, args: &ProjectArgs) -> TradeGrowthError {
    match err {
        TradeGrowthError::ConfigInvalid {
            section,
            key,
            reason,
        } => match flag_for_key(args, &key) {
            Some(flag) => TradeGrowthError::FlagInvalid {
                flag: flag.to_string(),
                reason,
            },
            None => TradeGrowthError::ConfigInvalid {
                section,
                key,
                reason,
            },
        },
        other => other,
    }
}

/// Load, validate, compute and render. Text (or JSON) goes to `out`; files
/// are written through the report adapters.
pub fn execute_project(
    args: &ProjectArgs,
    out: &mut dyn Write,
) -> Result<Estimate, TradeGrowthError> {
    // Stage 1: Load and check config
    let config = load_optional_config(args.config.as_ref())?;
    validate_config_file(&config)?;

    // Stage 2: Resolve parameters and apply guardrails
    let strategy = build_strategy_params(&config, args)?;
    validate_strategy_params(&strategy).map_err(|e| attribute_to_flag(e, args))?;
    let tax = build_tax_params(&config, args)?;
    if let Some(t) = &tax {
        validate_tax_params(t).map_err(|e| attribute_to_flag(e, args))?;
    } else {
        tracing::info!("tax stage disabled");
    }

    // Stage 3: Run the engine
    tracing::info!(
        initial_investment = strategy.initial_investment,
        gain = strategy.percentage_gain_per_trade,
        days = strategy.trading_days,
        trades_per_day = strategy.trades_per_day,
        reinvest = strategy.reinvest,
        "running projection"
    );
    let estimate = estimate::estimate(&strategy, tax.as_ref())?;

    // Stage 4: Render to the terminal
    write_estimate(args, &estimate, out)?;

    // Stage 5: Optional files
    let (csv_path, chart_path) = resolve_report_paths(&config, args);
    if let Some(path) = csv_path {
        CsvReportAdapter.write(&estimate, &path)?;
    }
    if let Some(path) = chart_path {
        SvgChartAdapter.write(&estimate, &path)?;
    }

    Ok(estimate)
}

#[cfg(feature = "json")]
fn write_estimate(
    args: &ProjectArgs,
    estimate: &Estimate,
    out: &mut dyn Write,
) -> Result<(), TradeGrowthError> {
    if args.json {
        let json = serde_json::to_string_pretty(estimate).map_err(io::Error::from)?;
        writeln!(out, "{json}")?;
    } else {
        write!(out, "{}", console_report::render(estimate))?;
    }
    Ok(())
}

#[cfg(not(feature = "json"))]
fn write_estimate(
    _args: &ProjectArgs,
    estimate: &Estimate,
    out: &mut dyn Write,
) -> Result<(), TradeGrowthError> {
    write!(out, "{}", console_report::render(estimate))?;
    Ok(())
}

fn run_project(args: &ProjectArgs) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match execute_project(args, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Validate a config file and describe the parameters it resolves to.
pub fn validate_config(
    config_path: &Path,
    out: &mut dyn Write,
) -> Result<(), TradeGrowthError> {
    let config = load_config(config_path)?;
    validate_config_file(&config)?;

    let defaults = ProjectArgs::default();
    let strategy = build_strategy_params(&config, &defaults)?;
    validate_strategy_params(&strategy)?;
    let tax = build_tax_params(&config, &defaults)?;
    if let Some(t) = &tax {
        validate_tax_params(t)?;
    }

    writeln!(out, "Strategy:")?;
    writeln!(
        out,
        "  initial_investment:        {}",
        console_report::format_currency(strategy.initial_investment)
    )?;
    writeln!(
        out,
        "  percentage_gain_per_trade: {}%",
        strategy.percentage_gain_per_trade
    )?;
    writeln!(out, "  trading_days:              {}", strategy.trading_days)?;
    writeln!(out, "  trades_per_day:            {}", strategy.trades_per_day)?;
    writeln!(out, "  reinvest:                  {}", strategy.reinvest)?;

    match &tax {
        Some(t) => {
            writeln!(out, "\nTax:")?;
            writeln!(out, "  gain_type:      {}", t.gain_type)?;
            match t.gain_type {
                GainType::ShortTerm => writeln!(out, "  federal_rate:   {}%", t.federal_rate)?,
                GainType::LongTerm => writeln!(out, "  long_term_rate: {}%", t.long_term_rate)?,
            }
            writeln!(out, "  state_rate:     {}%", t.state_rate)?;
            writeln!(
                out,
                "  deductions:     {}",
                console_report::format_currency(t.deductions)
            )?;
        }
        None => writeln!(out, "\nTax: disabled")?,
    }

    writeln!(out, "\nConfiguration is valid.")?;
    Ok(())
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match validate_config(config_path, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
