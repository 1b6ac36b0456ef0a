//! Exchange-rate forecasting.
//!
//! The default model is Holt's linear trend method (double exponential
//! smoothing). For a series `y_0 .. y_{n-1}`:
//!
//! ```text
//! level_0 = y_0            trend_0 = y_1 - y_0
//! level_t = α y_t + (1 - α)(level_{t-1} + trend_{t-1})
//! trend_t = β (level_t - level_{t-1}) + (1 - β) trend_{t-1}
//! ŷ_{n-1+h} = level_{n-1} + h · trend_{n-1}
//! ```
//!
//! In-sample values are one-step-ahead fits, so the output covers every
//! historical date followed by the forecast horizon.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use trade_core::Currency;

use crate::error::MarketError;
use crate::provider::{RateProvider, RateSeries};

/// Default level smoothing factor.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Default trend smoothing factor.
pub const DEFAULT_BETA: f64 = 0.1;

/// Default number of forecast days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Default history window in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

/// One forecast value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar date
    pub date: NaiveDate,
    /// Predicted rate
    pub yhat: f64,
}

/// Fitted history followed by the projection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// All points in date order
    pub points: Vec<ForecastPoint>,
    /// How many leading points are in-sample fits
    pub history_len: usize,
}

impl Forecast {
    /// The last `n` points.
    pub fn tail(&self, n: usize) -> &[ForecastPoint] {
        &self.points[self.points.len().saturating_sub(n)..]
    }

    /// Only the projected points.
    pub fn horizon(&self) -> &[ForecastPoint] {
        &self.points[self.history_len.min(self.points.len())..]
    }
}

/// A model that fits a series and projects it forward.
pub trait ForecastModel: Send + Sync {
    /// Fit `series` and extend it by `horizon_days` daily points.
    fn fit_predict(&self, series: &RateSeries, horizon_days: u32) -> Result<Forecast, MarketError>;
}

/// Holt's linear trend method.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoltLinear {
    /// Level smoothing in `(0, 1]`
    pub alpha: f64,
    /// Trend smoothing in `(0, 1]`
    pub beta: f64,
}

impl HoltLinear {
    /// Create a model with explicit smoothing factors.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }
}

impl Default for HoltLinear {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA, DEFAULT_BETA)
    }
}

impl ForecastModel for HoltLinear {
    fn fit_predict(&self, series: &RateSeries, horizon_days: u32) -> Result<Forecast, MarketError> {
        let points = series.points();
        if points.len() < 2 {
            return Err(MarketError::InsufficientHistory {
                points: points.len(),
            });
        }

        let mut level = points[0].1;
        let mut trend = points[1].1 - points[0].1;
        let mut out = Vec::with_capacity(points.len() + horizon_days as usize);
        out.push(ForecastPoint {
            date: points[0].0,
            yhat: level,
        });

        for &(date, y) in &points[1..] {
            out.push(ForecastPoint {
                date,
                yhat: level + trend,
            });
            let previous = level;
            level = self.alpha * y + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - previous) + (1.0 - self.beta) * trend;
        }

        let (last_date, _) = points[points.len() - 1];
        for h in 1..=horizon_days {
            let date = last_date
                .checked_add_days(Days::new(u64::from(h)))
                .ok_or_else(|| MarketError::InvalidDate(format!("{} + {} days", last_date, h)))?;
            out.push(ForecastPoint {
                date,
                yhat: level + f64::from(h) * trend,
            });
        }

        Ok(Forecast {
            points: out,
            history_len: points.len(),
        })
    }
}

/// Fetches history and runs a model over it.
pub struct Forecaster {
    model: Box<dyn ForecastModel>,
    lookback_days: u32,
    horizon_days: u32,
}

impl Forecaster {
    /// Create a forecaster.
    pub fn new(model: Box<dyn ForecastModel>, lookback_days: u32, horizon_days: u32) -> Self {
        Self {
            model,
            lookback_days,
            horizon_days,
        }
    }

    /// Forecast USD→`currency` from the `lookback_days` ending at `today`.
    pub async fn run(
        &self,
        provider: &dyn RateProvider,
        currency: Currency,
        today: NaiveDate,
    ) -> Result<Forecast, MarketError> {
        let start = today
            .checked_sub_days(Days::new(u64::from(self.lookback_days)))
            .ok_or_else(|| MarketError::InvalidDate(format!("{} - {} days", today, self.lookback_days)))?;

        let series = provider
            .timeseries(Currency::REFERENCE, currency, start, today)
            .await?;
        if series.is_empty() {
            return Err(MarketError::EmptySeries {
                currency: currency.to_string(),
            });
        }

        tracing::info!(
            %currency,
            observations = series.len(),
            horizon_days = self.horizon_days,
            "Forecasting exchange rate"
        );
        self.model.fit_predict(&series, self.horizon_days)
    }
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new(
            Box::new(HoltLinear::default()),
            DEFAULT_LOOKBACK_DAYS,
            DEFAULT_HORIZON_DAYS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixedRateProvider;
    use approx::assert_relative_eq;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(n))
            .unwrap()
    }

    fn linear_series(n: u64, start: f64, slope: f64) -> RateSeries {
        RateSeries::new((0..n).map(|i| (day(i), start + slope * i as f64)).collect())
    }

    #[test]
    fn test_linear_series_is_extrapolated_exactly() {
        let series = linear_series(20, 1_300.0, 2.0);
        let forecast = HoltLinear::default().fit_predict(&series, 30).unwrap();

        assert_eq!(forecast.points.len(), 50);
        assert_eq!(forecast.history_len, 20);
        for (point, (date, y)) in forecast.points.iter().zip(series.points()) {
            assert_eq!(point.date, *date);
            assert_relative_eq!(point.yhat, *y, epsilon = 1e-9);
        }
        let last = forecast.points.last().unwrap();
        assert_eq!(last.date, day(49));
        assert_relative_eq!(last.yhat, 1_300.0 + 2.0 * 49.0, epsilon = 1e-9);
    }

    #[test]
    fn test_constant_series_stays_flat() {
        let series = linear_series(5, 0.92, 0.0);
        let forecast = HoltLinear::new(0.3, 0.2).fit_predict(&series, 3).unwrap();
        assert!(forecast.horizon().iter().all(|p| (p.yhat - 0.92).abs() < 1e-12));
    }

    #[test]
    fn test_tail_and_horizon() {
        let forecast = HoltLinear::default()
            .fit_predict(&linear_series(3, 1.0, 1.0), 30)
            .unwrap();
        assert_eq!(forecast.horizon().len(), 30);
        assert_eq!(forecast.tail(10).len(), 10);
        assert_eq!(forecast.tail(100).len(), 33);
        assert_eq!(forecast.tail(1)[0].date, day(32));
    }

    #[test]
    fn test_insufficient_history() {
        let err = HoltLinear::default()
            .fit_predict(&linear_series(1, 1.0, 0.0), 30)
            .unwrap_err();
        assert!(matches!(err, MarketError::InsufficientHistory { points: 1 }));
    }

    #[tokio::test]
    async fn test_forecaster_uses_lookback_window() {
        let provider = FixedRateProvider::new().with_series(
            Currency::USD,
            Currency::KRW,
            (0..100).map(|i| (day(i), 1_300.0 + i as f64)).collect(),
        );
        let forecaster = Forecaster::new(Box::new(HoltLinear::default()), 9, 5);
        let forecast = forecaster.run(&provider, Currency::KRW, day(99)).await.unwrap();
        assert_eq!(forecast.history_len, 10);
        assert_eq!(forecast.horizon().len(), 5);
    }

    #[tokio::test]
    async fn test_forecaster_empty_series() {
        let provider = FixedRateProvider::new().with_series(Currency::USD, Currency::EUR, vec![]);
        let err = Forecaster::default()
            .run(&provider, Currency::EUR, day(0))
            .await
            .unwrap_err();
        assert!(matches!(err, MarketError::EmptySeries { .. }));
    }
}
