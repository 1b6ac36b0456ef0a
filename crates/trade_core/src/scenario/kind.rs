//! The fixed scenario menu.

/// One entry of the what-if menu.
///
/// Each kind names how the base tariff rate and base exchange rate are moved
/// by the tariff and exchange deltas. "Stronger Local" lowers the number of
/// local units per reference unit; "Weaker Local" raises it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    /// Unperturbed inputs
    Base,
    /// Tariff lowered by the tariff delta
    LowerTariff,
    /// Tariff raised by the tariff delta
    HigherTariff,
    /// Exchange rate lowered by the exchange delta
    StrongerLocal,
    /// Exchange rate raised by the exchange delta
    WeakerLocal,
    /// Both lowered
    LowerTariffStrongerLocal,
    /// Both raised
    HigherTariffWeakerLocal,
}

impl ScenarioKind {
    /// The whole menu, in render order.
    pub const MENU: [ScenarioKind; 7] = [
        ScenarioKind::Base,
        ScenarioKind::LowerTariff,
        ScenarioKind::HigherTariff,
        ScenarioKind::StrongerLocal,
        ScenarioKind::WeakerLocal,
        ScenarioKind::LowerTariffStrongerLocal,
        ScenarioKind::HigherTariffWeakerLocal,
    ];

    /// Get the label shown in tables and on chart axes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::LowerTariff => "Lower Tariff",
            Self::HigherTariff => "Higher Tariff",
            Self::StrongerLocal => "Stronger Local",
            Self::WeakerLocal => "Weaker Local",
            Self::LowerTariffStrongerLocal => "Lower Tariff & Stronger Local",
            Self::HigherTariffWeakerLocal => "Higher Tariff & Weaker Local",
        }
    }

    /// Sign applied to the tariff delta: -1, 0 or +1.
    pub fn tariff_direction(&self) -> i8 {
        match self {
            Self::LowerTariff | Self::LowerTariffStrongerLocal => -1,
            Self::HigherTariff | Self::HigherTariffWeakerLocal => 1,
            Self::Base | Self::StrongerLocal | Self::WeakerLocal => 0,
        }
    }

    /// Sign applied to the exchange delta: -1, 0 or +1.
    pub fn exchange_direction(&self) -> i8 {
        match self {
            Self::StrongerLocal | Self::LowerTariffStrongerLocal => -1,
            Self::WeakerLocal | Self::HigherTariffWeakerLocal => 1,
            Self::Base | Self::LowerTariff | Self::HigherTariff => 0,
        }
    }

    /// Tariff and exchange rate this entry prices with.
    ///
    /// Deltas are applied by plain addition/subtraction; a zero direction
    /// returns the base value bit-for-bit.
    pub fn perturb(
        &self,
        base_tariff_rate: f64,
        base_exchange_rate: f64,
        tariff_delta: f64,
        exchange_delta: f64,
    ) -> (f64, f64) {
        let tariff = match self.tariff_direction() {
            -1 => base_tariff_rate - tariff_delta,
            1 => base_tariff_rate + tariff_delta,
            _ => base_tariff_rate,
        };
        let exchange = match self.exchange_direction() {
            -1 => base_exchange_rate - exchange_delta,
            1 => base_exchange_rate + exchange_delta,
            _ => base_exchange_rate,
        };
        (tariff, exchange)
    }

    /// Look a kind up by its label.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::MENU.iter().copied().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_names_in_order() {
        let names: Vec<&str> = ScenarioKind::MENU.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "Base",
                "Lower Tariff",
                "Higher Tariff",
                "Stronger Local",
                "Weaker Local",
                "Lower Tariff & Stronger Local",
                "Higher Tariff & Weaker Local",
            ]
        );
    }

    #[test]
    fn test_perturb_base_is_identity() {
        let (t, x) = ScenarioKind::Base.perturb(8.0, 1300.0, 5.0, 100.0);
        assert_eq!(t, 8.0);
        assert_eq!(x, 1300.0);
    }

    #[test]
    fn test_perturb_combined() {
        assert_eq!(
            ScenarioKind::LowerTariffStrongerLocal.perturb(8.0, 1300.0, 5.0, 100.0),
            (3.0, 1200.0)
        );
        assert_eq!(
            ScenarioKind::HigherTariffWeakerLocal.perturb(8.0, 1300.0, 5.0, 100.0),
            (13.0, 1400.0)
        );
    }

    #[test]
    fn test_perturb_single_axis() {
        assert_eq!(ScenarioKind::LowerTariff.perturb(8.0, 1300.0, 5.0, 100.0), (3.0, 1300.0));
        assert_eq!(ScenarioKind::WeakerLocal.perturb(8.0, 1300.0, 5.0, 100.0), (8.0, 1400.0));
    }

    #[test]
    fn test_from_name_roundtrip() {
        for kind in ScenarioKind::MENU {
            assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ScenarioKind::from_name("Stronger Currency"), None);
    }
}
