//! Tariff and exchange-rate risk thresholds.
//!
//! Exchange volatility is measured two different ways across the toolkit's
//! alert surfaces. Neither unit is assumed; each is a separately labelled
//! [`VolatilityPolicy`] variant and the caller picks one.
//!
//! # Examples
//!
//! ```
//! use trade_core::risk::{TariffPolicy, VolatilityPolicy};
//!
//! assert!(TariffPolicy::default().is_high(12.5));
//!
//! let assessment = VolatilityPolicy::default().evaluate(1_400.0, 1_300.0);
//! assert_eq!(assessment.deviation, 7.69);
//! assert!(assessment.flagged);
//! ```

use serde::{Deserialize, Serialize};

use crate::types::round_to_cents;

/// Default tariff threshold in percent.
pub const DEFAULT_TARIFF_THRESHOLD_PCT: f64 = 10.0;

/// Default percent deviation from the window average.
pub const DEFAULT_VOLATILITY_THRESHOLD_PCT: f64 = 5.0;

/// Default threshold for the scaled absolute deviation.
pub const DEFAULT_SCALED_ABSOLUTE_THRESHOLD: f64 = 100.0;

/// Default baseline exchange rate for static route scoring.
pub const DEFAULT_BASELINE_RATE: f64 = 1_300.0;

/// Flags tariffs strictly above a percentage threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TariffPolicy {
    /// Threshold in percent
    pub threshold_pct: f64,
}

impl TariffPolicy {
    /// Create a new tariff policy.
    pub fn new(threshold_pct: f64) -> Self {
        Self { threshold_pct }
    }

    /// True when the tariff is strictly above the threshold.
    pub fn is_high(&self, tariff_rate: f64) -> bool {
        tariff_rate > self.threshold_pct
    }
}

impl Default for TariffPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TARIFF_THRESHOLD_PCT)
    }
}

/// How far the current exchange rate sits from its recent average.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VolatilityPolicy {
    /// `|current - average| / average * 100`, compared against a percent threshold.
    PercentOfAverage {
        /// Threshold in percent
        threshold_pct: f64,
    },
    /// `|current - average| * 100`, compared against an absolute threshold.
    ScaledAbsolute {
        /// Threshold in scaled rate units
        threshold: f64,
    },
}

/// Outcome of a volatility check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatilityAssessment {
    /// Deviation rounded to 2 decimal places
    pub deviation: f64,
    /// Whether the unrounded deviation exceeded the threshold
    pub flagged: bool,
}

impl VolatilityAssessment {
    /// The assessment shown when no observation is available.
    pub fn unavailable() -> Self {
        Self {
            deviation: 0.0,
            flagged: false,
        }
    }
}

impl VolatilityPolicy {
    /// Policy label used in configuration and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PercentOfAverage { .. } => "percent_of_average",
            Self::ScaledAbsolute { .. } => "scaled_absolute",
        }
    }

    /// The configured threshold, whatever its unit.
    pub fn threshold(&self) -> f64 {
        match self {
            Self::PercentOfAverage { threshold_pct } => *threshold_pct,
            Self::ScaledAbsolute { threshold } => *threshold,
        }
    }

    /// Build a policy from its label and threshold.
    pub fn from_label(label: &str, threshold: f64) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "percent_of_average" | "percent" => Some(Self::PercentOfAverage {
                threshold_pct: threshold,
            }),
            "scaled_absolute" | "absolute" => Some(Self::ScaledAbsolute { threshold }),
            _ => None,
        }
    }

    /// Raw deviation of `current` from `average` under this policy.
    ///
    /// A non-positive average cannot anchor a percentage and yields 0.
    pub fn deviation(&self, current: f64, average: f64) -> f64 {
        match self {
            Self::PercentOfAverage { .. } => {
                if average <= 0.0 {
                    0.0
                } else {
                    (current - average).abs() / average * 100.0
                }
            }
            Self::ScaledAbsolute { .. } => (current - average).abs() * 100.0,
        }
    }

    /// Measure and flag the deviation.
    pub fn evaluate(&self, current: f64, average: f64) -> VolatilityAssessment {
        let deviation = self.deviation(current, average);
        VolatilityAssessment {
            deviation: round_to_cents(deviation),
            flagged: deviation > self.threshold(),
        }
    }
}

impl Default for VolatilityPolicy {
    fn default() -> Self {
        Self::PercentOfAverage {
            threshold_pct: DEFAULT_VOLATILITY_THRESHOLD_PCT,
        }
    }
}

/// Static exchange-rate check against a fixed baseline rate.
///
/// Used where no live series is fetched: the route's stored rate is compared
/// with the baseline in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselinePolicy {
    /// Reference rate
    pub baseline_rate: f64,
    /// Threshold in percent
    pub threshold_pct: f64,
}

impl BaselinePolicy {
    /// Create a new baseline policy.
    pub fn new(baseline_rate: f64, threshold_pct: f64) -> Self {
        Self {
            baseline_rate,
            threshold_pct,
        }
    }

    /// True when `rate` deviates from the baseline by more than the threshold.
    ///
    /// A missing rate is treated as the baseline itself.
    pub fn is_volatile(&self, rate: Option<f64>) -> bool {
        let rate = rate.unwrap_or(self.baseline_rate);
        VolatilityPolicy::PercentOfAverage {
            threshold_pct: self.threshold_pct,
        }
        .evaluate(rate, self.baseline_rate)
        .flagged
    }
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE_RATE, DEFAULT_VOLATILITY_THRESHOLD_PCT)
    }
}

/// Route risk score in `0..=2`: one point for a high tariff, one for a
/// volatile stored exchange rate.
pub fn risk_score(
    tariff_rate: f64,
    exchange_rate: Option<f64>,
    tariff: &TariffPolicy,
    baseline: &BaselinePolicy,
) -> u8 {
    u8::from(tariff.is_high(tariff_rate)) + u8::from(baseline.is_volatile(exchange_rate))
}

/// Human-readable verdicts for alert surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Above threshold
    High,
    /// Within threshold
    Normal,
}

impl RiskLevel {
    /// Map a flag to a level.
    pub fn from_flag(flagged: bool) -> Self {
        if flagged {
            Self::High
        } else {
            Self::Normal
        }
    }

    /// Tariff verdict text.
    pub fn tariff_message(&self, tariff_rate: f64, threshold_pct: f64) -> String {
        match self {
            Self::High => format!(
                "High Tariff Risk: {}% (Threshold: {}%)",
                tariff_rate, threshold_pct
            ),
            Self::Normal => format!("Tariff is within safe range: {}%", tariff_rate),
        }
    }

    /// Exchange verdict text.
    pub fn exchange_message(&self, deviation: f64, window_days: u32) -> String {
        match self {
            Self::High => format!(
                "Exchange Volatility Detected: {}% deviation from {}-day average",
                deviation, window_days
            ),
            Self::Normal => format!("Exchange Rate Stable: {}% difference", deviation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tariff_policy_strict_threshold() {
        let policy = TariffPolicy::default();
        assert!(!policy.is_high(10.0));
        assert!(policy.is_high(10.01));
        assert!(!policy.is_high(-3.0));
    }

    #[test]
    fn test_percent_of_average_policy() {
        let policy = VolatilityPolicy::PercentOfAverage { threshold_pct: 5.0 };
        let a = policy.evaluate(1_330.0, 1_300.0);
        assert_eq!(a.deviation, 2.31);
        assert!(!a.flagged);

        let a = policy.evaluate(1_200.0, 1_300.0);
        assert_eq!(a.deviation, 7.69);
        assert!(a.flagged);
    }

    #[test]
    fn test_percent_of_average_zero_average() {
        let policy = VolatilityPolicy::default();
        assert_eq!(policy.evaluate(10.0, 0.0), VolatilityAssessment::unavailable());
    }

    #[test]
    fn test_scaled_absolute_policy() {
        let policy = VolatilityPolicy::ScaledAbsolute { threshold: 100.0 };
        let a = policy.evaluate(0.92, 0.91);
        assert_eq!(a.deviation, 1.0);
        assert!(!a.flagged);

        let a = policy.evaluate(1_310.0, 1_300.0);
        assert_eq!(a.deviation, 1_000.0);
        assert!(a.flagged);
    }

    #[test]
    fn test_policy_labels_roundtrip() {
        for policy in [
            VolatilityPolicy::PercentOfAverage { threshold_pct: 5.0 },
            VolatilityPolicy::ScaledAbsolute { threshold: 100.0 },
        ] {
            let rebuilt = VolatilityPolicy::from_label(policy.label(), policy.threshold());
            assert_eq!(rebuilt, Some(policy));
        }
        assert_eq!(VolatilityPolicy::from_label("stddev", 1.0), None);
    }

    #[test]
    fn test_baseline_policy() {
        let baseline = BaselinePolicy::default();
        assert!(!baseline.is_volatile(None));
        assert!(!baseline.is_volatile(Some(1_350.0)));
        assert!(baseline.is_volatile(Some(1_400.0)));
        assert!(baseline.is_volatile(Some(1.1)));
    }

    #[test]
    fn test_risk_score_components() {
        let tariff = TariffPolicy::default();
        let baseline = BaselinePolicy::default();
        assert_eq!(risk_score(5.0, None, &tariff, &baseline), 0);
        assert_eq!(risk_score(15.0, None, &tariff, &baseline), 1);
        assert_eq!(risk_score(5.0, Some(900.0), &tariff, &baseline), 1);
        assert_eq!(risk_score(25.0, Some(900.0), &tariff, &baseline), 2);
    }

    #[test]
    fn test_risk_level_messages() {
        let high = RiskLevel::from_flag(true).tariff_message(12.0, 10.0);
        assert_eq!(high, "High Tariff Risk: 12% (Threshold: 10%)");
        let stable = RiskLevel::from_flag(false).exchange_message(1.25, 30);
        assert_eq!(stable, "Exchange Rate Stable: 1.25% difference");
    }

    #[test]
    fn test_policy_serde_tagged() {
        let json = serde_json::to_string(&VolatilityPolicy::default()).unwrap();
        assert!(json.contains("\"kind\":\"percent_of_average\""));
    }
}
