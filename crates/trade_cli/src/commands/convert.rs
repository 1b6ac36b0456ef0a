//! Convert command implementation
//!
//! Prices every route in a chosen currency at the provider's latest USD rate.

use tracing::info;
use trade_core::Currency;
use trade_market::{Converter, RateProvider};
use trade_routes::RouteTable;

use crate::render::{self, OutputFormat};
use crate::Result;

/// Run the convert command
pub async fn run(
    table: &RouteTable,
    provider: &dyn RateProvider,
    currency: &str,
    format: OutputFormat,
) -> Result<String> {
    let currency: Currency = currency.parse()?;
    info!(%currency, provider = provider.name(), "Converting route prices");
    let converted = Converter::run(provider, table, currency).await?;

    if format == OutputFormat::Json {
        return render::to_json(&converted);
    }

    let price_header = format!("Price ({})", converted.currency);
    let rows: Vec<Vec<String>> = converted
        .rows
        .iter()
        .map(|r| {
            vec![
                r.import_country.clone(),
                r.product.clone(),
                render::money(r.final_price_usd),
                render::money(r.converted_price),
            ]
        })
        .collect();

    Ok(format!(
        "{}\n{}",
        converted.rate_line(),
        render::table(
            &["Importer", "Product", "Final (USD)", price_header.as_str()],
            &rows
        )
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{provider, table};
    use crate::CliError;

    #[tokio::test]
    async fn test_convert_table() {
        let out = run(&table(), &provider(), "eur", OutputFormat::Table)
            .await
            .unwrap();
        assert!(out.starts_with("1 USD = 0.92 EUR"));
        assert!(out.contains("Price (EUR)"));
        assert!(out.contains("30360.00"));
    }

    #[tokio::test]
    async fn test_convert_json() {
        let out = run(&table(), &provider(), "KRW", OutputFormat::Json)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["currency"], "KRW");
        assert_eq!(value["rows"][2]["convertedPrice"], 1_512_000.0);
    }

    #[tokio::test]
    async fn test_convert_failures() {
        let err = run(&table(), &provider(), "XYZ", OutputFormat::Table)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Currency(_)));

        let err = run(&table(), &provider(), "JPY", OutputFormat::Table)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::RateUnavailable(_)));
    }
}
