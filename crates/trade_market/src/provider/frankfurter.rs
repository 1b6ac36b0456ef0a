//! Frankfurter (ECB reference rates).

use std::time::Duration;

use chrono::NaiveDate;
use trade_core::Currency;

use super::{
    decode, parse_latest, parse_series, LatestBody, RateProvider, RateSeries, SeriesBody,
    DEFAULT_SERIES_TIMEOUT, DEFAULT_TIMEOUT,
};
use crate::error::MarketError;

/// Default Frankfurter endpoint.
pub const FRANKFURTER_URL: &str = "https://api.frankfurter.app";

/// Client for the Frankfurter API.
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
    series_timeout: Duration,
}

impl FrankfurterProvider {
    /// Create a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
            series_timeout: DEFAULT_SERIES_TIMEOUT,
        }
    }

    /// Override the request timeouts.
    pub fn with_timeouts(mut self, timeout: Duration, series_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.series_timeout = series_timeout;
        self
    }

    fn latest_url(&self, from: Currency, to: Currency) -> String {
        format!("{}/latest?from={}&to={}", self.base_url, from, to)
    }

    fn series_url(&self, from: Currency, to: Currency, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/{}..{}?from={}&to={}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            from,
            to
        )
    }
}

impl Default for FrankfurterProvider {
    fn default() -> Self {
        Self::new(FRANKFURTER_URL)
    }
}

#[async_trait::async_trait]
impl RateProvider for FrankfurterProvider {
    async fn latest(&self, from: Currency, to: Currency) -> Result<f64, MarketError> {
        if from == to {
            return Ok(1.0);
        }
        let url = self.latest_url(from, to);
        tracing::debug!(%url, "Fetching latest rate");
        let response = self.client.get(&url).timeout(self.timeout).send().await?;
        let body: LatestBody = decode(self.name(), response).await?;
        parse_latest(self.name(), body, to)
    }

    async fn timeseries(
        &self,
        from: Currency,
        to: Currency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, MarketError> {
        if from == to {
            return Ok(RateSeries::new(
                start.iter_days().take_while(|d| *d <= end).map(|d| (d, 1.0)).collect(),
            ));
        }
        let url = self.series_url(from, to, start, end);
        tracing::debug!(%url, "Fetching rate series");
        let response = self
            .client
            .get(&url)
            .timeout(self.series_timeout)
            .send()
            .await?;
        let body: SeriesBody = decode(self.name(), response).await?;
        parse_series(self.name(), body, to)
    }

    fn name(&self) -> &str {
        "frankfurter"
    }
}
