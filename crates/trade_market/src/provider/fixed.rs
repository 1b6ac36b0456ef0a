//! In-memory rates for tests and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use trade_core::Currency;

use super::{RateProvider, RateSeries};
use crate::error::MarketError;

/// Serves rates from memory and counts how often it is asked.
#[derive(Debug, Default)]
pub struct FixedRateProvider {
    rates: HashMap<(Currency, Currency), f64>,
    series: HashMap<(Currency, Currency), Vec<(NaiveDate, f64)>>,
    calls: AtomicUsize,
}

impl FixedRateProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a latest rate.
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: f64) -> Self {
        self.rates.insert((from, to), rate);
        self
    }

    /// Add a daily series.
    pub fn with_series(mut self, from: Currency, to: Currency, points: Vec<(NaiveDate, f64)>) -> Self {
        self.series.insert((from, to), points);
        self
    }

    /// Number of `latest` and `timeseries` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RateProvider for FixedRateProvider {
    async fn latest(&self, from: Currency, to: Currency) -> Result<f64, MarketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if from == to {
            return Ok(1.0);
        }
        self.rates
            .get(&(from, to))
            .copied()
            .ok_or_else(|| MarketError::missing_rates(self.name(), to))
    }

    async fn timeseries(
        &self,
        from: Currency,
        to: Currency,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RateSeries, MarketError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let points = self
            .series
            .get(&(from, to))
            .ok_or_else(|| MarketError::missing_rates(self.name(), to))?;
        Ok(RateSeries::new(
            points
                .iter()
                .filter(|(date, _)| *date >= start && *date <= end)
                .copied()
                .collect(),
        ))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
