//! Currency types for trade price conversion.
//!
//! This module provides ISO 4217 currency codes for the currencies the toolkit
//! converts into and forecasts, with decimal precision metadata and serde support.
//!
//! # Examples
//!
//! ```
//! use trade_core::types::currency::Currency;
//!
//! let krw: Currency = "krw".parse().unwrap();
//! assert_eq!(krw.code(), "KRW");
//! assert_eq!(krw.decimal_places(), 0);
//! assert_eq!(Currency::REFERENCE, Currency::USD);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// ISO 4217 currency codes with decimal precision metadata.
///
/// Prices in the route table are quoted in [`Currency::REFERENCE`] (USD) and
/// converted into one of these local currencies.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    /// United States Dollar
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// South Korean Won
    KRW,
    /// Japanese Yen
    JPY,
    /// Chinese Yuan Renminbi
    CNY,
    /// Indian Rupee
    INR,
    /// Australian Dollar
    AUD,
    /// Canadian Dollar
    CAD,
    /// Swiss Franc
    CHF,
    /// Brazilian Real
    BRL,
    /// Mexican Peso
    MXN,
    /// Vietnamese Dong
    VND,
    /// Thai Baht
    THB,
    /// South African Rand
    ZAR,
    /// Polish Zloty
    PLN,
    /// Turkish Lira
    TRY,
    /// UAE Dirham
    AED,
    /// Saudi Riyal
    SAR,
}

const ALL: [Currency; 19] = [
    Currency::USD,
    Currency::EUR,
    Currency::GBP,
    Currency::KRW,
    Currency::JPY,
    Currency::CNY,
    Currency::INR,
    Currency::AUD,
    Currency::CAD,
    Currency::CHF,
    Currency::BRL,
    Currency::MXN,
    Currency::VND,
    Currency::THB,
    Currency::ZAR,
    Currency::PLN,
    Currency::TRY,
    Currency::AED,
    Currency::SAR,
];

impl Currency {
    /// Currency every route-table price is quoted in.
    pub const REFERENCE: Currency = Currency::USD;

    /// Returns every known currency.
    pub fn all() -> &'static [Currency] {
        &ALL
    }

    /// Returns the ISO 4217 three-letter currency code.
    ///
    /// # Examples
    ///
    /// ```
    /// use trade_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.code(), "USD");
    /// assert_eq!(Currency::TRY.code(), "TRY");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::KRW => "KRW",
            Currency::JPY => "JPY",
            Currency::CNY => "CNY",
            Currency::INR => "INR",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
            Currency::CHF => "CHF",
            Currency::BRL => "BRL",
            Currency::MXN => "MXN",
            Currency::VND => "VND",
            Currency::THB => "THB",
            Currency::ZAR => "ZAR",
            Currency::PLN => "PLN",
            Currency::TRY => "TRY",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
        }
    }

    /// Returns the standard number of decimal places for this currency.
    ///
    /// KRW, JPY and VND have no minor units.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::KRW | Currency::JPY | Currency::VND => 0,
            _ => 2,
        }
    }

    /// Currencies offered by the price converter, sorted by code.
    ///
    /// # Examples
    ///
    /// ```
    /// use trade_core::types::currency::Currency;
    ///
    /// let targets = Currency::converter_targets();
    /// assert_eq!(targets.len(), 18);
    /// assert_eq!(targets[0], Currency::AED);
    /// ```
    pub fn converter_targets() -> Vec<Currency> {
        let mut targets: Vec<Currency> = ALL
            .iter()
            .copied()
            .filter(|c| *c != Currency::GBP)
            .collect();
        targets.sort_by_key(|c| c.code());
        targets
    }

    /// Currencies offered by the rate forecaster, in display order.
    pub fn forecast_targets() -> &'static [Currency] {
        &[
            Currency::KRW,
            Currency::EUR,
            Currency::JPY,
            Currency::CNY,
            Currency::INR,
            Currency::VND,
            Currency::THB,
            Currency::BRL,
            Currency::MXN,
            Currency::TRY,
        ]
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses ISO 4217 currency code (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let code = s.trim();
        if code.is_empty() {
            return Err(CurrencyError::Empty);
        }
        let upper = code.to_uppercase();
        ALL.iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for Currency {
    /// Formats as ISO 4217 code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
