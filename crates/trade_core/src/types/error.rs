//! Error types for structured error handling.
//!
//! The scenario engine is total and has no error type of its own; the only
//! fallible operation in this crate is turning user text into a [`Currency`].
//!
//! [`Currency`]: super::Currency

use thiserror::Error;

/// Currency-related errors.
///
/// # Examples
/// ```
/// use trade_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Unknown currency code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Currency code was empty after trimming.
    #[error("Currency code is empty")]
    Empty,
}
