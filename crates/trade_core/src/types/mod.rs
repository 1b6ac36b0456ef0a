//! Core trade types.
//!
//! This module provides:
//! - `currency`: ISO 4217 currency codes used by the converter and forecaster
//! - `error`: Structured error types for currency parsing
//! - `rounding`: Two-decimal rounding shared by every price the toolkit displays

pub mod currency;
pub mod error;
pub mod rounding;

// Re-export commonly used types at module level
pub use currency::Currency;
pub use error::CurrencyError;
pub use rounding::round_to_cents;
