//! Domain error types.

/// Top-level error type for marketdash.
#[derive(Debug, thiserror::Error)]
pub enum MarketdashError {
    #[error("invalid candle count {count}: {reason}")]
    InvalidCount { count: usize, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("catalog error: {reason}")]
    Catalog { reason: String },

    #[error("export error: {reason}")]
    Export { reason: String },

    #[error("invalid --{flag}: {reason}")]
    InvalidArgument { flag: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MarketdashError> for std::process::ExitCode {
    fn from(err: &MarketdashError) -> Self {
        let code: u8 = match err {
            MarketdashError::Io(_) => 1,
            MarketdashError::ConfigParse { .. } | MarketdashError::ConfigInvalid { .. } => 2,
            MarketdashError::Catalog { .. } => 3,
            MarketdashError::Export { .. } => 4,
            MarketdashError::InvalidCount { .. } | MarketdashError::InvalidArgument { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

impl From<csv::Error> for MarketdashError {
    fn from(err: csv::Error) -> Self {
        MarketdashError::Export {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_count_message() {
        let err = MarketdashError::InvalidCount {
            count: 0,
            reason: "at least one candle is required".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid candle count 0: at least one candle is required"
        );
    }

    #[test]
    fn config_invalid_message_names_section_and_key() {
        let err = MarketdashError::ConfigInvalid {
            section: "generator".into(),
            key: "chart_length".into(),
            reason: "must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value [generator] chart_length: must be at least 1"
        );
    }

    #[test]
    fn exit_codes_by_category() {
        use std::process::ExitCode;
        let config = MarketdashError::ConfigInvalid {
            section: "generator".into(),
            key: "seed".into(),
            reason: "seed must be a non-negative integer".into(),
        };
        assert_eq!(ExitCode::from(&config), ExitCode::from(2));
        let arg = MarketdashError::InvalidArgument {
            flag: "ma".into(),
            reason: "'x' is not a valid period".into(),
        };
        assert_eq!(arg.to_string(), "invalid --ma: 'x' is not a valid period");
        assert_eq!(ExitCode::from(&arg), ExitCode::from(5));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MarketdashError = io.into();
        assert!(matches!(err, MarketdashError::Io(_)));
    }
}
