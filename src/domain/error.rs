//! Domain error types.

/// Top-level error type for tradegrowth.
#[derive(Debug, thiserror::Error)]
pub enum TradeGrowthError {
    #[error("invalid parameter {field}: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("degenerate arithmetic: {reason}")]
    ArithmeticDegenerate { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid value for --{flag}: {reason}")]
    FlagInvalid { flag: String, reason: String },

    #[error("failed to write report {path}: {reason}")]
    Report { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TradeGrowthError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        TradeGrowthError::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&TradeGrowthError> for std::process::ExitCode {
    fn from(err: &TradeGrowthError) -> Self {
        let code: u8 = match err {
            TradeGrowthError::Io(_) | TradeGrowthError::Report { .. } => 1,
            TradeGrowthError::ConfigParse { .. }
            | TradeGrowthError::ConfigMissing { .. }
            | TradeGrowthError::ConfigInvalid { .. }
            | TradeGrowthError::FlagInvalid { .. } => 2,
            TradeGrowthError::InvalidParameter { .. } => 3,
            TradeGrowthError::ArithmeticDegenerate { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
