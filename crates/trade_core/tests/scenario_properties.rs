//! Property tests for the scenario pricing engine.

use proptest::prelude::*;
use trade_core::scenario::{compute_scenarios, final_price, ScenarioKind};

fn price_strategy() -> impl Strategy<Value = f64> {
    0.01f64..1_000_000.0
}

fn tariff_strategy() -> impl Strategy<Value = f64> {
    -50.0f64..200.0
}

fn exchange_strategy() -> impl Strategy<Value = f64> {
    0.0001f64..50_000.0
}

fn delta_strategy() -> impl Strategy<Value = f64> {
    0.0f64..500.0
}

fn price_of(rows: &[trade_core::ScenarioResult], kind: ScenarioKind) -> f64 {
    rows[ScenarioKind::MENU.iter().position(|k| *k == kind).unwrap()].final_price
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_always_seven_rows_in_menu_order(
        price in price_strategy(),
        tariff in tariff_strategy(),
        exchange in exchange_strategy(),
        dt in delta_strategy(),
        dx in delta_strategy()
    ) {
        let rows = compute_scenarios(price, tariff, exchange, dt, dx);
        prop_assert_eq!(rows.len(), 7);
        for (row, kind) in rows.iter().zip(ScenarioKind::MENU.iter()) {
            prop_assert_eq!(row.name.as_str(), kind.name());
        }
    }

    #[test]
    fn test_base_row_matches_formula(
        price in price_strategy(),
        tariff in tariff_strategy(),
        exchange in exchange_strategy(),
        dt in delta_strategy(),
        dx in delta_strategy()
    ) {
        let rows = compute_scenarios(price, tariff, exchange, dt, dx);
        let unrounded = price * (1.0 + tariff / 100.0) * exchange;
        let got = rows[0].final_price;
        prop_assert!((got - unrounded).abs() <= 0.005 + unrounded.abs() * 1e-12);
        prop_assert_eq!(got, format!("{:.2}", got).parse::<f64>().unwrap());
        prop_assert_eq!(rows[0].tariff_rate, tariff);
        prop_assert_eq!(rows[0].exchange_rate, exchange);
    }

    #[test]
    fn test_monotonic_in_tariff(
        price in price_strategy(),
        tariff in tariff_strategy(),
        exchange in exchange_strategy(),
        dt in delta_strategy(),
        dx in delta_strategy()
    ) {
        let rows = compute_scenarios(price, tariff, exchange, dt, dx);
        let base = price_of(&rows, ScenarioKind::Base);
        prop_assert!(price_of(&rows, ScenarioKind::LowerTariff) <= base);
        prop_assert!(base <= price_of(&rows, ScenarioKind::HigherTariff));
    }

    #[test]
    fn test_monotonic_in_exchange_rate(
        price in price_strategy(),
        tariff in 0.0f64..200.0,
        exchange in exchange_strategy(),
        dt in delta_strategy(),
        dx in delta_strategy()
    ) {
        let rows = compute_scenarios(price, tariff, exchange, dt, dx);
        let base = price_of(&rows, ScenarioKind::Base);
        prop_assert!(price_of(&rows, ScenarioKind::StrongerLocal) <= base);
        prop_assert!(base <= price_of(&rows, ScenarioKind::WeakerLocal));
    }

    #[test]
    fn test_zero_deltas_collapse(
        price in price_strategy(),
        tariff in tariff_strategy(),
        exchange in exchange_strategy()
    ) {
        let rows = compute_scenarios(price, tariff, exchange, 0.0, 0.0);
        let base = final_price(price, tariff, exchange);
        prop_assert!(rows.iter().all(|r| r.final_price == base));
    }

    #[test]
    fn test_idempotent(
        price in price_strategy(),
        tariff in tariff_strategy(),
        exchange in exchange_strategy(),
        dt in delta_strategy(),
        dx in delta_strategy()
    ) {
        let first = serde_json::to_string(&compute_scenarios(price, tariff, exchange, dt, dx)).unwrap();
        let second = serde_json::to_string(&compute_scenarios(price, tariff, exchange, dt, dx)).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_base_row_matches_decimal_rounding_reference() {
    // Reference values from Python's round(x, 2)
    for (price, expected) in [(0.125, 0.12), (10.125, 10.12), (1.115, 1.11), (30_000.125, 30_000.12)] {
        let rows = compute_scenarios(price, 0.0, 1.0, 0.0, 0.0);
        assert_eq!(rows[0].final_price, expected, "base price {}", price);
    }
}
