//! Check command implementation
//!
//! Validates configuration and the route table, optionally pinging the rate
//! provider.

use tracing::{info, warn};
use trade_core::Currency;
use trade_market::RateProvider;

use super::Context;
use crate::Result;

/// Run the check command
pub async fn run(ctx: &Context, provider: Option<&dyn RateProvider>) -> Result<String> {
    let config = &ctx.config;
    config.validate()?;

    let mut out = String::new();
    out.push_str(&format!("Configuration: ok ({})\n", config.environment));
    out.push_str(&format!(
        "  scenario deltas: tariff ±{}, exchange ±{}\n",
        config.scenario.tariff_delta, config.scenario.exchange_delta
    ));
    out.push_str(&format!(
        "  volatility policy: {}\n",
        config.risk.volatility_policy()?.label()
    ));
    out.push_str(&format!("  extractor: {}\n", config.assistant.extractor));

    let table = ctx.table()?;
    info!(routes = table.len(), "Route table loaded");
    out.push_str(&format!(
        "Route table: {} routes, {} countries, {} products ({})\n",
        table.len(),
        table.countries().len(),
        table.products().len(),
        config.data_path.display()
    ));

    let unknown: Vec<&str> = table
        .routes()
        .iter()
        .map(|r| r.import_currency.as_str())
        .filter(|code| code.parse::<Currency>().is_err())
        .collect();
    if !unknown.is_empty() {
        warn!(?unknown, "Routes with unsupported currencies");
        out.push_str(&format!("  unsupported currencies: {}\n", unknown.join(", ")));
    }

    match provider {
        Some(provider) => match provider.latest(Currency::REFERENCE, Currency::EUR).await {
            Ok(rate) => out.push_str(&format!(
                "Rate provider {}: ok (1 USD = {:.4} EUR)\n",
                provider.name(),
                rate
            )),
            Err(e) => {
                warn!(provider = provider.name(), error = %e, "Rate provider check failed");
                out.push_str(&format!("Rate provider {}: unavailable ({})\n", provider.name(), e));
            }
        },
        None => out.push_str(&format!(
            "Rate provider: {} (not contacted, pass --online)\n",
            config.market.provider
        )),
    }
    Ok(out)
}
