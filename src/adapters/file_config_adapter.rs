//! INI file configuration adapter.

use crate::domain::error::TradeGrowthError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

/// Keys read from each section. Anything else in the file is ignored and
/// reported by [`FileConfigAdapter::unknown_keys`].
const KNOWN_KEYS: [(&str, &[&str]); 3] = [
    (
        "strategy",
        &[
            "initial_investment",
            "percentage_gain_per_trade",
            "trading_days",
            "trades_per_day",
            "reinvest",
        ],
    ),
    (
        "tax",
        &[
            "enabled",
            "federal_rate",
            "state_rate",
            "deductions",
            "gain_type",
            "long_term_rate",
        ],
    ),
    ("report", &["csv_path", "chart_path"]),
];

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TradeGrowthError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| TradeGrowthError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, TradeGrowthError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| TradeGrowthError::ConfigParse {
                file: "<inline>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// A config with no sections; every lookup yields its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    /// `section.key` for every entry the calculator does not read, sorted.
    /// Usually a typo such as `trading_day`.
    pub fn unknown_keys(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .config
            .get_map_ref()
            .iter()
            .flat_map(|(section, entries)| {
                let known = KNOWN_KEYS
                    .iter()
                    .find(|(name, _)| *name == section.as_str())
                    .map(|(_, keys)| *keys)
                    .unwrap_or(&[]);
                entries
                    .keys()
                    .filter(move |key| !known.contains(&key.as_str()))
                    .map(move |key| format!("{section}.{key}"))
            })
            .collect();
        unknown.sort();
        unknown
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v))
            .unwrap_or(default)
    }
}
