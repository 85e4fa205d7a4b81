//! tradegrowth: projected growth of a repeated-percentage-gain trading
//! strategy, with optional tax accounting.
//!
//! Hexagonal architecture: the pure projection and tax engine lives in
//! [`domain`], port traits in [`ports`], file and terminal output in
//! [`adapters`], and the command-line front end in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

pub use domain::error::TradeGrowthError;
pub use domain::estimate::{estimate, Estimate, GrowthMode, StrategySummary};
pub use domain::params::{GainType, StrategyParams, TaxParams};
pub use domain::projection::{project, DayRecord, ProjectionResult};
pub use domain::tax::{compute_tax, FederalLine, TaxBreakdown};
