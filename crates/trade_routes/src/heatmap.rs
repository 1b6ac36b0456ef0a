//! Country-by-country risk heatmap.
//!
//! Every route gets a [`risk_score`] in `0..=2`. The busiest exporters and
//! importers are kept and the scores are averaged per (exporter, importer)
//! cell.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use trade_core::risk::{risk_score, BaselinePolicy, TariffPolicy};

use crate::table::{RouteTable, TradeRoute};

/// How many exporters and importers the heatmap keeps.
pub const HEATMAP_TOP_N: usize = 10;

/// Mean risk score per exporter/importer pair.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskHeatmap {
    /// Row labels, sorted
    pub exporters: Vec<String>,
    /// Column labels, sorted
    pub importers: Vec<String>,
    /// `cells[row][col]`; pairs with no route are 0
    pub cells: Vec<Vec<f64>>,
}

impl RiskHeatmap {
    /// Build the heatmap for a route table.
    ///
    /// Routes without a stored exchange rate score as if they sat on the
    /// baseline.
    pub fn build(table: &RouteTable, tariff: &TariffPolicy, baseline: &BaselinePolicy) -> Self {
        let scores: Vec<u8> = table
            .routes()
            .par_iter()
            .map(|r| risk_score(r.tariff_rate, r.exchange_rate_usd_to_local, tariff, baseline))
            .collect();

        let exporters = top_by_count(table.routes().iter().map(|r| r.export_country.as_str()));
        let importers = top_by_count(table.routes().iter().map(|r| r.import_country.as_str()));

        let mut sums: HashMap<(&str, &str), (f64, usize)> = HashMap::new();
        let mut rows = BTreeSet::new();
        let mut cols = BTreeSet::new();
        for (route, score) in table.routes().iter().zip(&scores) {
            if !kept(route, &exporters, &importers) {
                continue;
            }
            rows.insert(route.export_country.as_str());
            cols.insert(route.import_country.as_str());
            let entry = sums
                .entry((route.export_country.as_str(), route.import_country.as_str()))
                .or_insert((0.0, 0));
            entry.0 += f64::from(*score);
            entry.1 += 1;
        }

        let cells = rows
            .iter()
            .map(|export| {
                cols.iter()
                    .map(|import| {
                        sums.get(&(*export, *import))
                            .map(|(sum, n)| sum / *n as f64)
                            .unwrap_or(0.0)
                    })
                    .collect()
            })
            .collect();

        tracing::debug!(
            routes = table.len(),
            rows = rows.len(),
            cols = cols.len(),
            "Built risk heatmap"
        );

        Self {
            exporters: rows.into_iter().map(str::to_string).collect(),
            importers: cols.into_iter().map(str::to_string).collect(),
            cells,
        }
    }

    /// Score for a pair, if both countries are on the map.
    pub fn cell(&self, export: &str, import: &str) -> Option<f64> {
        let row = self.exporters.iter().position(|e| e == export)?;
        let col = self.importers.iter().position(|i| i == import)?;
        Some(self.cells[row][col])
    }

    /// True when no route survived the filter.
    pub fn is_empty(&self) -> bool {
        self.exporters.is_empty()
    }
}

fn kept(route: &TradeRoute, exporters: &HashSet<&str>, importers: &HashSet<&str>) -> bool {
    exporters.contains(route.export_country.as_str())
        && importers.contains(route.import_country.as_str())
}

/// The `HEATMAP_TOP_N` most frequent names; ties go to the alphabetically first.
fn top_by_count<'a>(names: impl Iterator<Item = &'a str>) -> HashSet<&'a str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in names {
        *counts.entry(name).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(HEATMAP_TOP_N)
        .map(|(name, _)| name)
        .collect()
}
