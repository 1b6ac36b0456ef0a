//! Scenario execution.
//!
//! `compute_scenarios` is a pure mapping from a base triple and two deltas to
//! the priced menu. It holds no state, performs no I/O and never fails for
//! finite inputs, so callers may invoke it from any thread and cache its output.

use serde::{Deserialize, Serialize};

use super::kind::ScenarioKind;
use crate::types::round_to_cents;

/// Inputs to one scenario run.
///
/// Nothing is validated: a zero or negative exchange rate simply propagates
/// into a zero or negative final price.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Price in the reference currency
    pub base_price: f64,
    /// Tariff in percent
    pub base_tariff_rate: f64,
    /// Local currency units per reference unit
    pub base_exchange_rate: f64,
    /// Magnitude of the lower/higher tariff variants
    pub tariff_delta: f64,
    /// Magnitude of the stronger/weaker currency variants
    pub exchange_delta: f64,
}

impl ScenarioInput {
    /// Create a new scenario input.
    pub fn new(
        base_price: f64,
        base_tariff_rate: f64,
        base_exchange_rate: f64,
        tariff_delta: f64,
        exchange_delta: f64,
    ) -> Self {
        Self {
            base_price,
            base_tariff_rate,
            base_exchange_rate,
            tariff_delta,
            exchange_delta,
        }
    }

    /// Price the full menu for this input.
    pub fn compute(&self) -> Vec<ScenarioResult> {
        compute_scenarios(
            self.base_price,
            self.base_tariff_rate,
            self.base_exchange_rate,
            self.tariff_delta,
            self.exchange_delta,
        )
    }
}

/// One priced entry of the scenario menu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    /// Menu label
    pub name: String,
    /// Tariff used for this row, in percent
    pub tariff_rate: f64,
    /// Exchange rate used for this row
    pub exchange_rate: f64,
    /// Localised price, rounded to 2 decimal places
    pub final_price: f64,
}

impl ScenarioResult {
    /// The menu entry this row was priced for.
    pub fn kind(&self) -> Option<ScenarioKind> {
        ScenarioKind::from_name(&self.name)
    }
}

/// Localised price for a single tariff/exchange pair.
///
/// `round(base_price * (1 + tariff_rate / 100) * exchange_rate, 2)`
///
/// # Examples
///
/// ```
/// use trade_core::scenario::final_price;
///
/// assert!((final_price(30_000.0, 8.0, 1_300.0) - 42_120_000.0).abs() < 1e-6);
/// ```
#[inline]
pub fn final_price(base_price: f64, tariff_rate: f64, exchange_rate: f64) -> f64 {
    let tariffed_price = base_price * (1.0 + tariff_rate / 100.0);
    round_to_cents(tariffed_price * exchange_rate)
}

/// Price every entry of the fixed scenario menu.
///
/// Rows come back in [`ScenarioKind::MENU`] order; the first is always `Base`
/// and carries the unperturbed tariff and exchange rate.
pub fn compute_scenarios(
    base_price: f64,
    base_tariff_rate: f64,
    base_exchange_rate: f64,
    tariff_delta: f64,
    exchange_delta: f64,
) -> Vec<ScenarioResult> {
    ScenarioKind::MENU
        .iter()
        .map(|kind| {
            let (tariff_rate, exchange_rate) =
                kind.perturb(base_tariff_rate, base_exchange_rate, tariff_delta, exchange_delta);
            ScenarioResult {
                name: kind.name().to_string(),
                tariff_rate,
                exchange_rate,
                final_price: final_price(base_price, tariff_rate, exchange_rate),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_rows() -> Vec<ScenarioResult> {
        compute_scenarios(30_000.0, 8.0, 1_300.0, 5.0, 100.0)
    }

    fn price_of(rows: &[ScenarioResult], kind: ScenarioKind) -> f64 {
        rows.iter()
            .find(|r| r.name == kind.name())
            .map(|r| r.final_price)
            .unwrap()
    }

    #[test]
    fn test_reference_scenario_prices() {
        let rows = reference_rows();
        assert_relative_eq!(price_of(&rows, ScenarioKind::Base), 42_120_000.0, epsilon = 1e-6);
        assert_relative_eq!(price_of(&rows, ScenarioKind::LowerTariff), 40_170_000.0, epsilon = 1e-6);
        assert_relative_eq!(price_of(&rows, ScenarioKind::HigherTariff), 44_070_000.0, epsilon = 1e-6);
        assert_relative_eq!(price_of(&rows, ScenarioKind::StrongerLocal), 38_880_000.0, epsilon = 1e-6);
        assert_relative_eq!(price_of(&rows, ScenarioKind::WeakerLocal), 45_360_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            price_of(&rows, ScenarioKind::LowerTariffStrongerLocal),
            30_000.0 * 1.03 * 1_200.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            price_of(&rows, ScenarioKind::HigherTariffWeakerLocal),
            30_000.0 * 1.13 * 1_400.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_seven_rows_in_menu_order() {
        let rows = reference_rows();
        assert_eq!(rows.len(), 7);
        for (row, kind) in rows.iter().zip(ScenarioKind::MENU.iter()) {
            assert_eq!(row.name, kind.name());
            assert_eq!(row.kind(), Some(*kind));
        }
    }

    #[test]
    fn test_base_row_reproduces_inputs_exactly() {
        let rows = compute_scenarios(123.45, 7.3, 1_337.7, 2.5, 44.4);
        let base: Vec<&ScenarioResult> = rows.iter().filter(|r| r.name == "Base").collect();
        assert_eq!(base.len(), 1);
        assert_eq!(base[0].tariff_rate, 7.3);
        assert_eq!(base[0].exchange_rate, 1_337.7);
    }

    #[test]
    fn test_zero_deltas_collapse_to_base() {
        let rows = compute_scenarios(30_000.0, 8.0, 1_300.0, 0.0, 0.0);
        let base = rows[0].final_price;
        assert!(rows.iter().all(|r| r.final_price == base));
    }

    #[test]
    fn test_negative_exchange_rate_propagates() {
        let rows = compute_scenarios(100.0, 0.0, -2.0, 0.0, 0.0);
        assert_relative_eq!(rows[0].final_price, -200.0);

        let rows = compute_scenarios(100.0, 10.0, 0.0, 0.0, 0.0);
        assert_eq!(rows[0].final_price, 0.0);
    }

    #[test]
    fn test_final_price_rounds_stored_decimal_value() {
        assert_eq!(final_price(0.125, 0.0, 1.0), 0.12);
        assert_eq!(final_price(1.115, 0.0, 1.0), 1.11);
        assert_eq!(final_price(8.345, 0.0, 1.0), 8.35);
        assert_eq!(final_price(10.125, 0.0, 1.0), 10.12);
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(reference_rows(), reference_rows());
    }

    #[test]
    fn test_input_compute_matches_free_function() {
        let input = ScenarioInput::new(30_000.0, 8.0, 1_300.0, 5.0, 100.0);
        assert_eq!(input.compute(), reference_rows());
    }

    #[test]
    fn test_final_price_rounds_to_cents() {
        assert_relative_eq!(final_price(10.0, 3.333, 1.0), 10.33);
        assert_relative_eq!(final_price(1.0, 0.0, 1.005_1), 1.01);
    }

    #[test]
    fn test_result_serialises_camel_case() {
        let json = serde_json::to_string(&reference_rows()[0]).unwrap();
        assert!(json.contains("\"tariffRate\""));
        assert!(json.contains("\"exchangeRate\""));
        assert!(json.contains("\"finalPrice\""));
    }
}
