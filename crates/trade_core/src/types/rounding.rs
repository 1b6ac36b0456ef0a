//! Two-decimal rounding for displayed prices.

/// Rounds a value to 2 decimal places.
///
/// Rounding works on the exact decimal expansion of the stored double, so a
/// value such as `1.115` (stored just below it) rounds down, and exact binary
/// ties such as `0.125` round to the even digit.
///
/// Non-finite values are returned unchanged.
///
/// # Examples
///
/// ```
/// use trade_core::types::round_to_cents;
///
/// assert_eq!(round_to_cents(1.234), 1.23);
/// assert_eq!(round_to_cents(1.115), 1.11);
/// assert_eq!(round_to_cents(0.125), 0.12);
/// assert_eq!(round_to_cents(42_120_000.000_000_01), 42_120_000.0);
/// ```
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}
