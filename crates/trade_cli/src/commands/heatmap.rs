//! Heatmap command implementation

use trade_core::risk::{BaselinePolicy, TariffPolicy};
use trade_routes::{RiskHeatmap, RouteTable};

use crate::render::{self, OutputFormat};
use crate::Result;

/// Run the heatmap command
pub fn run(
    table: &RouteTable,
    tariff: &TariffPolicy,
    baseline: &BaselinePolicy,
    format: OutputFormat,
) -> Result<String> {
    let map = RiskHeatmap::build(table, tariff, baseline);

    if format == OutputFormat::Json {
        return render::to_json(&map);
    }

    let mut headers = vec!["Exporter \\ Importer"];
    headers.extend(map.importers.iter().map(String::as_str));
    let rows: Vec<Vec<String>> = map
        .exporters
        .iter()
        .zip(&map.cells)
        .map(|(exporter, cells)| {
            std::iter::once(exporter.clone())
                .chain(cells.iter().map(|v| format!("{:.1}", v)))
                .collect()
        })
        .collect();

    Ok(format!(
        "Mean risk score (0 = safe, 2 = high tariff and volatile rate)\n{}",
        render::table(&headers, &rows)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::table;

    #[test]
    fn test_heatmap_grid() {
        let out = run(
            &table(),
            &TariffPolicy::default(),
            &BaselinePolicy::default(),
            OutputFormat::Table,
        )
        .unwrap();
        let header = out.lines().nth(2).unwrap();
        assert!(header.contains("Germany") && header.contains("Japan") && header.contains("Korea"));
        let brazil = out.lines().find(|l| l.contains("Brazil")).unwrap();
        // Brazil → Japan: high tariff, no stored rate
        assert!(brazil.contains("1.0"));
    }

    #[test]
    fn test_heatmap_json() {
        let out = run(
            &table(),
            &TariffPolicy::default(),
            &BaselinePolicy::default(),
            OutputFormat::Json,
        )
        .unwrap();
        let map: RiskHeatmap = serde_json::from_str(&out).unwrap();
        assert_eq!(map.exporters, vec!["Brazil", "Korea", "United States"]);
        assert_eq!(map.cell("United States", "Korea"), Some(1.0));
    }
}
