//! Scenario command implementation
//!
//! Prices the what-if menu for one base triple and charts it.

use tracing::info;
use trade_core::scenario::{ScenarioInput, ScenarioResult};

use crate::render::{self, OutputFormat};
use crate::{CliError, Result};

/// Run the scenario command
pub fn run(input: ScenarioInput, format: OutputFormat) -> Result<String> {
    let values = [
        input.base_price,
        input.base_tariff_rate,
        input.base_exchange_rate,
        input.tariff_delta,
        input.exchange_delta,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CliError::InvalidArgument(
            "Scenario inputs must be finite numbers".to_string(),
        ));
    }

    info!(
        base_price = input.base_price,
        tariff = input.base_tariff_rate,
        exchange = input.base_exchange_rate,
        "Pricing scenarios"
    );
    let results = input.compute();

    match format {
        OutputFormat::Json => render::to_json(&results),
        OutputFormat::Table => Ok(render_table(&results)),
    }
}

fn render_table(results: &[ScenarioResult]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format!("{}%", r.tariff_rate),
                format!("{}", r.exchange_rate),
                render::money(r.final_price),
            ]
        })
        .collect();
    let chart: Vec<(String, f64)> = results
        .iter()
        .map(|r| (r.name.clone(), r.final_price))
        .collect();

    format!(
        "{}\nFinal price by scenario\n{}",
        render::table(&["Scenario", "Tariff", "Exchange Rate", "Final Price"], &rows),
        render::bar_chart(&chart)
    )
}
