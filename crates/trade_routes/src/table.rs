//! The static trade-route table.
//!
//! Each row describes one export/import/product route with its USD base
//! price, tariff and the currency of the importing country. The stored
//! exchange rate is optional; callers supply a fallback when it is missing.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RouteError;

/// One row of the route table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TradeRoute {
    /// Exporting country
    pub export_country: String,
    /// Importing country
    pub import_country: String,
    /// Product name
    pub product: String,
    /// Base price in USD
    pub base_price_usd: f64,
    /// Tariff in percent
    pub tariff_rate: f64,
    /// Price after tariff, in USD
    pub final_price_usd: f64,
    /// ISO code of the importing country's currency
    pub import_currency: String,
    /// Stored USD to local rate, if the table carries one
    #[serde(default)]
    pub exchange_rate_usd_to_local: Option<f64>,
}

impl TradeRoute {
    /// Display label used in route selection lists.
    pub fn label(&self) -> String {
        format!(
            "{} → {} ({})",
            self.export_country, self.import_country, self.product
        )
    }

    /// Stored exchange rate, or `fallback` when the row has none.
    pub fn exchange_rate_or(&self, fallback: f64) -> f64 {
        self.exchange_rate_usd_to_local.unwrap_or(fallback)
    }
}

/// An in-memory, read-only route table.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<TradeRoute>,
}

impl RouteTable {
    /// Build a table from already-parsed routes.
    pub fn new(routes: Vec<TradeRoute>) -> Self {
        Self { routes }
    }

    /// Load a table from a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RouteError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            routes = table.len(),
            "Loaded route table"
        );
        Ok(table)
    }

    /// Parse a table from any CSV source.
    ///
    /// Columns are matched by header name; unknown columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RouteError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let routes = csv_reader
            .deserialize::<TradeRoute>()
            .enumerate()
            .map(|(i, record)| record.map_err(|source| RouteError::Csv { row: i + 1, source }))
            .collect::<Result<Vec<_>, _>>()?;

        if routes.is_empty() {
            return Err(RouteError::Empty);
        }
        Ok(Self { routes })
    }

    /// All routes, in file order.
    pub fn routes(&self) -> &[TradeRoute] {
        &self.routes
    }

    /// Route at `index`.
    pub fn get(&self, index: usize) -> Result<&TradeRoute, RouteError> {
        self.routes.get(index).ok_or(RouteError::IndexOutOfRange {
            index,
            len: self.routes.len(),
        })
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every export and import country, in order of first appearance.
    pub fn countries(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut countries = Vec::new();
        for route in &self.routes {
            for country in [&route.export_country, &route.import_country] {
                if seen.insert(country.as_str()) {
                    countries.push(country.clone());
                }
            }
        }
        countries
    }

    /// Distinct products, in order of first appearance.
    pub fn products(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.routes
            .iter()
            .filter(|r| seen.insert(r.product.as_str()))
            .map(|r| r.product.clone())
            .collect()
    }

    /// First route matching the countries exactly and the product case-insensitively.
    pub fn find(&self, export: &str, import: &str, product: &str) -> Option<&TradeRoute> {
        let product = product.to_lowercase();
        self.routes.iter().find(|r| {
            r.export_country == export
                && r.import_country == import
                && r.product.to_lowercase() == product
        })
    }
}
