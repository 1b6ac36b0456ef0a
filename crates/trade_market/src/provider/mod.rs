//! Exchange-rate providers.
//!
//! [`RateProvider`] is the only thing the rest of the toolkit knows about
//! rate retrieval: a latest rate or a dated series, or a [`MarketError`].
//! Response shapes of the public APIs are decoded inside each provider.

mod cache;
mod exchangerate_host;
mod fixed;
mod frankfurter;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trade_core::Currency;

use crate::error::MarketError;

pub use cache::{CachedRateProvider, DEFAULT_CACHE_TTL};
pub use exchangerate_host::ExchangeRateHostProvider;
pub use fixed::FixedRateProvider;
pub use frankfurter::FrankfurterProvider;

/// Default timeout for a latest-rate request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for a series request.
pub const DEFAULT_SERIES_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of exchange rates.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Units of `to` per unit of `from`, as of now.
    async fn latest(&self, from: Currency, to: Currency) -> Result<f64, MarketError>;

    /// Daily rates for `[start, end]`, sorted by date.
    async fn timeseries(
        &self,
        from: Currency,
        to: Currency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, MarketError>;

    /// Provider name for logs and errors.
    fn name(&self) -> &str;
}

/// Date-sorted exchange-rate observations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl RateSeries {
    /// Build a series; points are sorted by date.
    pub fn new(mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);
        Self { points }
    }

    /// Observations in date order.
    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Rates in date order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when there are no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Arithmetic mean of the rates.
    pub fn average(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.values().sum::<f64>() / self.points.len() as f64)
    }

    /// Most recent observation.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }
}

/// Live rate, or `fallback` when the provider fails.
pub async fn rate_or_fallback(
    provider: &dyn RateProvider,
    from: Currency,
    to: Currency,
    fallback: f64,
) -> f64 {
    match provider.latest(from, to).await {
        Ok(rate) => rate,
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                %from,
                %to,
                fallback,
                error = %e,
                "Exchange rate unavailable, using fallback"
            );
            fallback
        }
    }
}

/// Which public API to call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// api.frankfurter.app
    #[default]
    Frankfurter,
    /// api.exchangerate.host
    ExchangerateHost,
}

impl ProviderKind {
    /// Configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frankfurter => "frankfurter",
            Self::ExchangerateHost => "exchangerate_host",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '.'], "_").as_str() {
            "frankfurter" => Ok(Self::Frankfurter),
            "exchangerate_host" => Ok(Self::ExchangerateHost),
            other => Err(format!(
                "Unknown rate provider: {} (expected frankfurter or exchangerate_host)",
                other
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for the HTTP providers.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderSettings {
    /// Which API to call
    pub kind: ProviderKind,
    /// Base URL of the selected API
    pub base_url: String,
    /// Latest-rate timeout
    pub timeout: Duration,
    /// Series timeout
    pub series_timeout: Duration,
    /// How long cached rates are served
    pub cache_ttl: Duration,
}

/// Build the configured provider behind a cache.
pub fn build_provider(settings: &ProviderSettings) -> Arc<dyn RateProvider> {
    tracing::info!(
        provider = %settings.kind,
        base_url = %settings.base_url,
        cache_ttl_secs = settings.cache_ttl.as_secs(),
        "Using exchange-rate provider"
    );
    match settings.kind {
        ProviderKind::Frankfurter => Arc::new(CachedRateProvider::new(
            FrankfurterProvider::new(settings.base_url.clone())
                .with_timeouts(settings.timeout, settings.series_timeout),
        )
        .with_ttl(settings.cache_ttl)),
        ProviderKind::ExchangerateHost => Arc::new(CachedRateProvider::new(
            ExchangeRateHostProvider::new(settings.base_url.clone())
                .with_timeouts(settings.timeout, settings.series_timeout),
        )
        .with_ttl(settings.cache_ttl)),
    }
}

/// `{"rates": {"EUR": 0.92}}`
#[derive(Debug, Deserialize)]
struct LatestBody {
    rates: Option<HashMap<String, f64>>,
}

/// `{"rates": {"2024-01-02": {"EUR": 0.91}, ...}}`
#[derive(Debug, Deserialize)]
struct SeriesBody {
    rates: Option<BTreeMap<String, HashMap<String, f64>>>,
}

fn parse_latest(provider: &str, body: LatestBody, to: Currency) -> Result<f64, MarketError> {
    body.rates
        .and_then(|rates| rates.get(to.code()).copied())
        .ok_or_else(|| MarketError::missing_rates(provider, to))
}

/// Dates missing the target currency are skipped.
fn parse_series(provider: &str, body: SeriesBody, to: Currency) -> Result<RateSeries, MarketError> {
    let rates = body
        .rates
        .ok_or_else(|| MarketError::missing_rates(provider, to))?;

    let mut points = Vec::with_capacity(rates.len());
    for (date, by_currency) in rates {
        let Some(rate) = by_currency.get(to.code()) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| MarketError::InvalidDate(date.clone()))?;
        points.push((date, *rate));
    }
    Ok(RateSeries::new(points))
}

/// Turn a response into its decoded body, mapping non-success statuses.
async fn decode<T: serde::de::DeserializeOwned>(
    provider: &str,
    response: reqwest::Response,
) -> Result<T, MarketError> {
    let status = response.status();
    if !status.is_success() {
        return Err(MarketError::Status {
            provider: provider.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.json().await?)
}
