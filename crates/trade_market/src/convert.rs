//! Route prices converted into a selected currency.

use serde::{Deserialize, Serialize};
use trade_core::types::round_to_cents;
use trade_core::Currency;
use trade_routes::RouteTable;

use crate::error::MarketError;
use crate::provider::RateProvider;

/// Shown when the rate lookup fails.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch exchange rate. Please try again later.";

/// One converted route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRow {
    /// Importing country
    pub import_country: String,
    /// Product
    pub product: String,
    /// Price after tariff, in USD
    pub final_price_usd: f64,
    /// `final_price_usd * rate`, rounded to 2 decimal places
    pub converted_price: f64,
}

/// Every route priced in one currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTable {
    /// Target currency
    pub currency: Currency,
    /// USD→currency rate used
    pub rate: f64,
    /// Converted rows, in table order
    pub rows: Vec<ConversionRow>,
}

impl ConversionTable {
    /// `1 USD = {rate:.2} {currency}`
    pub fn rate_line(&self) -> String {
        format!("1 USD = {:.2} {}", self.rate, self.currency)
    }
}

/// Convert every route's USD final price at `rate`.
pub fn convert_routes(table: &RouteTable, currency: Currency, rate: f64) -> ConversionTable {
    let rows = table
        .routes()
        .iter()
        .map(|r| ConversionRow {
            import_country: r.import_country.clone(),
            product: r.product.clone(),
            final_price_usd: r.final_price_usd,
            converted_price: round_to_cents(r.final_price_usd * rate),
        })
        .collect();
    ConversionTable {
        currency,
        rate,
        rows,
    }
}

/// Fetches the USD rate and converts the table.
pub struct Converter;

impl Converter {
    /// Convert `table` into `currency` at the provider's latest USD rate.
    pub async fn run(
        provider: &dyn RateProvider,
        table: &RouteTable,
        currency: Currency,
    ) -> Result<ConversionTable, MarketError> {
        let rate = provider.latest(Currency::REFERENCE, currency).await?;
        tracing::info!(%currency, rate, routes = table.len(), "Converting route prices");
        Ok(convert_routes(table, currency, rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixedRateProvider;
    use approx::assert_relative_eq;

    const SAMPLE: &str = "\
export_country,import_country,product,base_price_usd,tariff_rate,final_price_usd,import_currency
Korea,Germany,Passenger cars,30000,10,33000,EUR
Brazil,Japan,Meat,5000,12,5600,JPY
Germany,France,Wheat,250,0,250.333,EUR
";

    fn table() -> RouteTable {
        RouteTable::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_convert_routes_rounds() {
        let converted = convert_routes(&table(), Currency::KRW, 1_350.5);
        assert_eq!(converted.rows.len(), 3);
        assert_relative_eq!(converted.rows[0].converted_price, 44_566_500.0);
        assert_relative_eq!(converted.rows[2].converted_price, 338_074.72);
        assert_eq!(converted.rate_line(), "1 USD = 1350.50 KRW");
    }

    #[tokio::test]
    async fn test_converter_usd_is_identity() {
        let provider = FixedRateProvider::new();
        let converted = Converter::run(&provider, &table(), Currency::USD).await.unwrap();
        assert_eq!(converted.rate, 1.0);
        assert_relative_eq!(converted.rows[2].converted_price, 250.33);
    }

    #[tokio::test]
    async fn test_converter_propagates_failure() {
        let provider = FixedRateProvider::new();
        assert!(Converter::run(&provider, &table(), Currency::TRY).await.is_err());
    }
}
