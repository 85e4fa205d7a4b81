//! Core domain types and logic.

pub mod params;
pub mod projection;
pub mod tax;
pub mod estimate;
pub mod config_validation;
pub mod error;
