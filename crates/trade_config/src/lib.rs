//! Configuration for the `tradekit` CLI and `tradekit-server`.
//!
//! Sources, highest priority first:
//! 1. CLI arguments
//! 2. `TRADEKIT_*` environment variables
//! 3. A TOML file
//! 4. Defaults

mod config;
mod error;
mod levels;
mod sources;

pub use config::{
    AssistantSection, ForecastSection, MarketSection, RiskSection, ScenarioSection, ToolkitConfig,
};
pub use error::ConfigError;
pub use levels::{Environment, LogLevel};
pub use sources::{build_config, CliArgs};
