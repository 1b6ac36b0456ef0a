//! Forecast command implementation
//!
//! Fits the configured model to a year of USD rates and shows the tail.

use chrono::NaiveDate;
use tracing::info;
use trade_core::Currency;
use trade_market::{Forecaster, RateProvider};

use crate::render::{self, OutputFormat};
use crate::Result;

/// Points shown when no `--tail` is given.
pub const DEFAULT_TAIL: usize = 30;

/// Run the forecast command
pub async fn run(
    forecaster: &Forecaster,
    provider: &dyn RateProvider,
    currency: &str,
    today: NaiveDate,
    tail: usize,
    format: OutputFormat,
) -> Result<String> {
    let currency: Currency = currency.parse()?;
    info!(%currency, %today, "Running forecast");
    let forecast = forecaster.run(provider, currency, today).await?;
    let points = forecast.tail(tail);

    if format == OutputFormat::Json {
        return render::to_json(points);
    }

    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                p.date.to_string(),
                format!("{:.4}", p.yhat),
                if p.date > today { "forecast" } else { "fit" }.to_string(),
            ]
        })
        .collect();
    Ok(format!(
        "USD → {} forecast, last {} of {} points\n{}",
        currency,
        points.len(),
        forecast.points.len(),
        render::table(&["Date", "Predicted", "Kind"], &rows)
    ))
}
