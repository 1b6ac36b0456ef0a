//! Risk command implementation
//!
//! Tariff and exchange-volatility alerts for one route.

use chrono::NaiveDate;
use trade_core::risk::{TariffPolicy, VolatilityPolicy};
use trade_market::{RateProvider, RouteRiskAlert};
use trade_routes::RouteTable;

use crate::render::{self, OutputFormat};
use crate::Result;

/// Thresholds and window for one run
pub struct RiskOptions {
    pub tariff: TariffPolicy,
    pub volatility: VolatilityPolicy,
    pub window_days: u32,
    pub today: NaiveDate,
}

/// Run the risk command
pub async fn run(
    table: &RouteTable,
    provider: &dyn RateProvider,
    index: usize,
    options: &RiskOptions,
    format: OutputFormat,
) -> Result<String> {
    let route = table.get(index)?;
    let alert = RouteRiskAlert::assess(
        route,
        provider,
        options.today,
        &options.tariff,
        &options.volatility,
        options.window_days,
    )
    .await;

    if format == OutputFormat::Json {
        return render::to_json(&alert);
    }

    let marker = |flagged: bool| if flagged { "[!]" } else { "[ok]" };
    let shown = alert.shown_volatility();
    Ok(format!(
        "{}\n{} {}\n{} {}\nPolicy: {} (threshold {})\n",
        alert.route,
        marker(alert.tariff_high),
        alert.tariff_message,
        marker(shown.flagged),
        alert.exchange_message,
        alert.volatility_policy,
        options.volatility.threshold()
    ))
}
