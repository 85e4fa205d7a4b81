//! Configuration access port trait.

use crate::domain::error::TradeGrowthError;

/// Typed key lookup over a sectioned configuration source. Lookups that fall
/// back to a default never fail; malformed values are caught separately by
/// `config_validation::validate_config_file`.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Read a day or trade count, rejecting values that do not fit a `u32`.
    fn get_count(&self, section: &str, key: &str, default: u32) -> Result<u32, TradeGrowthError> {
        let value = self.get_int(section, key, i64::from(default));
        u32::try_from(value).map_err(|_| TradeGrowthError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a non-negative whole number, got {value}"),
        })
    }
}
