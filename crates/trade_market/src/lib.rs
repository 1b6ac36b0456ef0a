//! # trade_market: Exchange-Rate Capability for the Trade Toolkit
//!
//! Everything that needs a live or historical exchange rate lives here:
//!
//! - `provider`: the [`RateProvider`] capability with HTTP, fixed and cached
//!   implementations
//! - `convert`: route prices in a selected currency
//! - `forecast`: forward rate projection
//! - `volatility`: current rate versus its recent average, and per-route alerts
//!
//! Response schemas stay inside the concrete providers; everything else only
//! sees numbers and [`RateSeries`].
//!
//! ## Usage Examples
//!
//! ```rust
//! use trade_core::Currency;
//! use trade_market::{FixedRateProvider, RateProvider};
//!
//! let provider = FixedRateProvider::new().with_rate(Currency::USD, Currency::KRW, 1_350.0);
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let rate = rt.block_on(provider.latest(Currency::USD, Currency::KRW)).unwrap();
//! assert_eq!(rate, 1_350.0);
//! ```

pub mod convert;
pub mod error;
pub mod forecast;
pub mod provider;
pub mod volatility;

pub use convert::{convert_routes, ConversionRow, ConversionTable, Converter};
pub use error::MarketError;
pub use forecast::{Forecast, ForecastModel, ForecastPoint, Forecaster, HoltLinear};
pub use provider::{
    build_provider, rate_or_fallback, CachedRateProvider, ExchangeRateHostProvider,
    FixedRateProvider, FrankfurterProvider, ProviderKind, ProviderSettings, RateProvider,
    RateSeries,
};
pub use volatility::{observe, RouteRiskAlert, VolatilityObservation};
