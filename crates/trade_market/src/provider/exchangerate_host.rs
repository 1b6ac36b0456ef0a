//! exchangerate.host.

use std::time::Duration;

use chrono::NaiveDate;
use trade_core::Currency;

use super::{
    decode, parse_latest, parse_series, LatestBody, RateProvider, RateSeries, SeriesBody,
    DEFAULT_SERIES_TIMEOUT, DEFAULT_TIMEOUT,
};
use crate::error::MarketError;

/// Default exchangerate.host endpoint.
pub const EXCHANGERATE_HOST_URL: &str = "https://api.exchangerate.host";

/// Client for the exchangerate.host API.
///
/// The service reports failures in a 200 body without `rates`; those surface
/// as [`MarketError::MissingRates`].
pub struct ExchangeRateHostProvider {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
    series_timeout: Duration,
}

impl ExchangeRateHostProvider {
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
        format!("{}/latest?base={}&symbols={}", self.base_url, from, to)
    }

    fn series_url(&self, from: Currency, to: Currency, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}/timeseries?start_date={}&end_date={}&base={}&symbols={}",
            self.base_url,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            from,
            to
        )
    }
}

impl Default for ExchangeRateHostProvider {
    fn default() -> Self {
        Self::new(EXCHANGERATE_HOST_URL)
    }
}

#[async_trait::async_trait]
impl RateProvider for ExchangeRateHostProvider {
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
        "exchangerate.host"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let provider = ExchangeRateHostProvider::default();
        assert_eq!(
            provider.latest_url(Currency::USD, Currency::JPY),
            "https://api.exchangerate.host/latest?base=USD&symbols=JPY"
        );
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            provider.series_url(Currency::USD, Currency::KRW, start, end),
            "https://api.exchangerate.host/timeseries?start_date=2023-01-01&end_date=2024-01-01&base=USD&symbols=KRW"
        );
    }

    #[tokio::test]
    async fn test_same_currency_short_circuits() {
        let provider = ExchangeRateHostProvider::new("http://127.0.0.1:9");
        assert_eq!(provider.latest(Currency::KRW, Currency::KRW).await.unwrap(), 1.0);
    }
}
