//! Error types for exchange-rate retrieval and forecasting.

use thiserror::Error;
use trade_core::CurrencyError;

/// Errors raised by rate providers and the computations built on them.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Transport failure, timeout or undecodable body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("{provider} returned HTTP {status}")]
    Status {
        /// Provider name
        provider: String,
        /// HTTP status code
        status: u16,
    },

    /// Response carried no rate for the requested currency.
    #[error("{provider} returned no rates for {currency}")]
    MissingRates {
        /// Provider name
        provider: String,
        /// Requested currency code
        currency: String,
    },

    /// A date key in a series response did not parse.
    #[error("Invalid date in rate series: {0}")]
    InvalidDate(String),

    /// The requested window produced no observations.
    #[error("No exchange-rate history for {currency}")]
    EmptySeries {
        /// Requested currency code
        currency: String,
    },

    /// Too few observations to fit a model.
    #[error("At least 2 observations are required, got {points}")]
    InsufficientHistory {
        /// Number of observations available
        points: usize,
    },

    /// Route currency code not understood.
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

impl MarketError {
    /// Create a missing-rates error.
    pub fn missing_rates(provider: &str, currency: impl ToString) -> Self {
        Self::MissingRates {
            provider: provider.to_string(),
            currency: currency.to_string(),
        }
    }
}
