//! Exchange-rate volatility observation and per-route alerts.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use trade_core::risk::{RiskLevel, TariffPolicy, VolatilityAssessment, VolatilityPolicy};
use trade_core::Currency;
use trade_routes::TradeRoute;

use crate::error::MarketError;
use crate::provider::RateProvider;

/// Default averaging window in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// A window average and the current rate, USD→currency.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolatilityObservation {
    /// Mean over the window
    pub average: f64,
    /// Latest rate
    pub current: f64,
}

impl VolatilityObservation {
    /// Apply a threshold policy.
    pub fn assess(&self, policy: &VolatilityPolicy) -> VolatilityAssessment {
        policy.evaluate(self.current, self.average)
    }
}

/// Fetch the `window_days` average and the latest rate for `currency`.
pub async fn observe(
    provider: &dyn RateProvider,
    currency: Currency,
    today: NaiveDate,
    window_days: u32,
) -> Result<VolatilityObservation, MarketError> {
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .ok_or_else(|| MarketError::InvalidDate(format!("{} - {} days", today, window_days)))?;

    let series = provider
        .timeseries(Currency::REFERENCE, currency, start, today)
        .await?;
    let average = series.average().ok_or_else(|| MarketError::EmptySeries {
        currency: currency.to_string(),
    })?;
    let current = provider.latest(Currency::REFERENCE, currency).await?;

    Ok(VolatilityObservation { average, current })
}

/// Tariff and exchange verdicts for one route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRiskAlert {
    /// Route label
    pub route: String,
    /// Tariff in percent
    pub tariff_rate: f64,
    /// Tariff verdict
    pub tariff_high: bool,
    /// Tariff message
    pub tariff_message: String,
    /// Volatility verdict; `None` when no observation was possible
    pub volatility: Option<VolatilityAssessment>,
    /// Exchange message
    pub exchange_message: String,
    /// Policy that produced the volatility verdict
    pub volatility_policy: String,
}

impl RouteRiskAlert {
    /// Assess a route.
    ///
    /// When the import currency is unknown or the provider fails, a warning
    /// is logged and the exchange verdict reads as stable with 0 deviation.
    pub async fn assess(
        route: &TradeRoute,
        provider: &dyn RateProvider,
        today: NaiveDate,
        tariff: &TariffPolicy,
        volatility: &VolatilityPolicy,
        window_days: u32,
    ) -> Self {
        let tariff_high = tariff.is_high(route.tariff_rate);

        let observed = match route.import_currency.parse::<Currency>() {
            Ok(currency) => observe(provider, currency, today, window_days).await,
            Err(e) => Err(e.into()),
        };
        let assessment = match observed {
            Ok(observation) => Some(observation.assess(volatility)),
            Err(e) => {
                tracing::warn!(
                    route = %route.label(),
                    currency = %route.import_currency,
                    error = %e,
                    "Failed to fetch exchange rate data"
                );
                None
            }
        };
        let shown = assessment.unwrap_or_else(VolatilityAssessment::unavailable);

        Self {
            route: route.label(),
            tariff_rate: route.tariff_rate,
            tariff_high,
            tariff_message: RiskLevel::from_flag(tariff_high)
                .tariff_message(route.tariff_rate, tariff.threshold_pct),
            volatility: assessment,
            exchange_message: RiskLevel::from_flag(shown.flagged)
                .exchange_message(shown.deviation, window_days),
            volatility_policy: volatility.label().to_string(),
        }
    }

    /// The assessment to display, 0 / not flagged when unavailable.
    pub fn shown_volatility(&self) -> VolatilityAssessment {
        self.volatility.unwrap_or_else(VolatilityAssessment::unavailable)
    }
}
