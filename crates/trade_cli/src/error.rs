//! CLI error types

use thiserror::Error;
use trade_config::ConfigError;
use trade_core::CurrencyError;
use trade_market::convert::FETCH_FAILED_MESSAGE;
use trade_market::MarketError;
use trade_routes::RouteError;

/// Errors surfaced to the terminal
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Currency(#[from] CurrencyError),

    #[error("{prefix} ({0})", prefix = FETCH_FAILED_MESSAGE)]
    RateUnavailable(MarketError),

    #[error(transparent)]
    Market(MarketError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<MarketError> for CliError {
    fn from(e: MarketError) -> Self {
        match e {
            MarketError::Currency(inner) => CliError::Currency(inner),
            MarketError::InsufficientHistory { .. } | MarketError::EmptySeries { .. } => {
                CliError::Market(e)
            }
            other => CliError::RateUnavailable(other),
        }
    }
}

/// CLI result alias
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failures_read_as_fetch_failures() {
        let err: CliError = MarketError::missing_rates("fixed", "EUR").into();
        assert!(err.to_string().starts_with(FETCH_FAILED_MESSAGE));

        let err: CliError = MarketError::InsufficientHistory { points: 1 }.into();
        assert!(matches!(err, CliError::Market(_)));

        let err: CliError = MarketError::Currency(CurrencyError::Empty).into();
        assert_eq!(err.to_string(), "Currency code is empty");
    }
}
