//! Routes command implementation

use trade_routes::RouteTable;

use crate::render::{self, OutputFormat};
use crate::Result;

/// Run the routes command
pub fn run(table: &RouteTable, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return render::to_json(table.routes());
    }

    let rows: Vec<Vec<String>> = table
        .routes()
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                i.to_string(),
                r.export_country.clone(),
                r.import_country.clone(),
                r.product.clone(),
                render::money(r.base_price_usd),
                format!("{}%", r.tariff_rate),
                render::money(r.final_price_usd),
                r.import_currency.clone(),
                r.exchange_rate_usd_to_local
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    Ok(render::table(
        &[
            "#",
            "Exporter",
            "Importer",
            "Product",
            "Base (USD)",
            "Tariff",
            "Final (USD)",
            "Currency",
            "USD Rate",
        ],
        &rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::table;

    #[test]
    fn test_routes_table() {
        let out = run(&table(), OutputFormat::Table).unwrap();
        assert!(out.contains("Passenger cars"));
        assert!(out.contains("33000.00"));
        // Brazil → Japan stores no rate
        assert!(out.lines().any(|l| l.contains("Meat") && l.contains(" - ")));
    }

    #[test]
    fn test_routes_json() {
        let out = run(&table(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["import_currency"], "EUR");
    }
}
