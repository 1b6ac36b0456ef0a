//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands return the
//! text to print so they can be tested without a terminal.

pub mod ask;
pub mod check;
pub mod convert;
pub mod forecast;
pub mod heatmap;
pub mod risk;
pub mod routes;
pub mod scenario;

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use trade_config::ToolkitConfig;
use trade_market::{build_provider, RateProvider};
use trade_routes::RouteTable;

use crate::{CliError, Result};

/// Everything a command needs besides its own arguments
pub struct Context {
    pub config: ToolkitConfig,
}

impl Context {
    pub fn new(config: ToolkitConfig) -> Self {
        Self { config }
    }

    /// Load the configured route table
    pub fn table(&self) -> Result<RouteTable> {
        let path: &Path = &self.config.data_path;
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Ok(RouteTable::from_path(path)?)
    }

    /// The configured rate provider, behind a cache
    pub fn provider(&self) -> Arc<dyn RateProvider> {
        build_provider(&self.config.market.provider_settings())
    }

    /// End date for rate windows
    pub fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}
