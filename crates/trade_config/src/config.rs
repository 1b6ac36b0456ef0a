//! The toolkit configuration structure.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use trade_core::risk::{BaselinePolicy, TariffPolicy, VolatilityPolicy};
use trade_market::forecast::{Forecaster, HoltLinear};
use trade_market::provider::{ProviderKind, ProviderSettings};
use trade_routes::{AssistantSettings, ExtractorKind};

use crate::error::ConfigError;
use crate::levels::{Environment, LogLevel};

/// Scenario deltas shared by every surface.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioSection {
    /// Tariff perturbation, in percentage points
    pub tariff_delta: f64,
    /// Exchange perturbation, in local units per USD
    pub exchange_delta: f64,
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            tariff_delta: 5.0,
            exchange_delta: 100.0,
        }
    }
}

/// Alert thresholds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RiskSection {
    /// Tariffs above this percentage are flagged
    pub tariff_threshold_pct: f64,
    /// `percent_of_average` or `scaled_absolute`
    pub volatility_policy: String,
    /// Policy threshold; the policy's own default when unset
    pub volatility_threshold: Option<f64>,
    /// Reference KRW rate for the heatmap's stored-rate check
    pub baseline_rate: f64,
    /// Allowed deviation from `baseline_rate`, in percent
    pub baseline_threshold_pct: f64,
    /// Averaging window for live volatility
    pub window_days: u32,
}

impl Default for RiskSection {
    fn default() -> Self {
        Self {
            tariff_threshold_pct: 10.0,
            volatility_policy: "percent_of_average".to_string(),
            volatility_threshold: None,
            baseline_rate: 1_300.0,
            baseline_threshold_pct: 5.0,
            window_days: 30,
        }
    }
}

impl RiskSection {
    /// Tariff threshold as a policy.
    pub fn tariff_policy(&self) -> TariffPolicy {
        TariffPolicy::new(self.tariff_threshold_pct)
    }

    /// Stored-rate check used by the heatmap.
    pub fn baseline_policy(&self) -> BaselinePolicy {
        BaselinePolicy::new(self.baseline_rate, self.baseline_threshold_pct)
    }

    /// Resolve the labelled volatility policy.
    pub fn volatility_policy(&self) -> Result<VolatilityPolicy, ConfigError> {
        let default_threshold = match self.volatility_policy.trim().to_lowercase().as_str() {
            "scaled_absolute" | "absolute" => trade_core::risk::DEFAULT_SCALED_ABSOLUTE_THRESHOLD,
            _ => trade_core::risk::DEFAULT_VOLATILITY_THRESHOLD_PCT,
        };
        let threshold = self.volatility_threshold.unwrap_or(default_threshold);
        VolatilityPolicy::from_label(&self.volatility_policy, threshold).ok_or_else(|| {
            ConfigError::invalid(
                "risk.volatility_policy",
                format!(
                    "{} (expected percent_of_average or scaled_absolute)",
                    self.volatility_policy
                ),
            )
        })
    }
}

/// Exchange-rate provider settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    /// Which API serves rates
    pub provider: ProviderKind,
    /// Base URL of the Frankfurter API
    pub frankfurter_url: String,
    /// Base URL of the exchangerate.host API
    pub exchangerate_host_url: String,
    /// Latest-rate request timeout, in seconds
    pub timeout_secs: u64,
    /// Series request timeout, in seconds
    pub series_timeout_secs: u64,
    /// How long a fetched rate is reused, in seconds; 0 disables caching
    pub cache_ttl_secs: u64,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Frankfurter,
            frankfurter_url: "https://api.frankfurter.app".to_string(),
            exchangerate_host_url: "https://api.exchangerate.host".to_string(),
            timeout_secs: 5,
            series_timeout_secs: 10,
            cache_ttl_secs: 300,
        }
    }
}

impl MarketSection {
    /// Settings for the selected provider.
    pub fn provider_settings(&self) -> ProviderSettings {
        let base_url = match self.provider {
            ProviderKind::Frankfurter => self.frankfurter_url.clone(),
            ProviderKind::ExchangerateHost => self.exchangerate_host_url.clone(),
        };
        ProviderSettings {
            kind: self.provider,
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            series_timeout: Duration::from_secs(self.series_timeout_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
        }
    }
}

/// Forecast model settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastSection {
    /// History fetched before fitting
    pub lookback_days: u32,
    /// Days forecast past the last observation
    pub horizon_days: u32,
    /// Level smoothing factor, in (0, 1]
    pub alpha: f64,
    /// Trend smoothing factor, in (0, 1]
    pub beta: f64,
}

impl Default for ForecastSection {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            horizon_days: 30,
            alpha: 0.5,
            beta: 0.1,
        }
    }
}

impl ForecastSection {
    /// Holt linear forecaster with these settings.
    pub fn forecaster(&self) -> Forecaster {
        Forecaster::new(
            Box::new(HoltLinear::new(self.alpha, self.beta)),
            self.lookback_days,
            self.horizon_days,
        )
    }
}

/// Question extraction settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssistantSection {
    /// Entity extraction strategy
    pub extractor: ExtractorKind,
    /// Minimum similarity for a fuzzy match, in (0, 1]
    pub fuzzy_threshold: f64,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            extractor: ExtractorKind::Keyword,
            fuzzy_threshold: 0.8,
        }
    }
}

/// Toolkit configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Route table CSV
    pub data_path: PathBuf,
    /// USD→local rate used when neither the table nor the provider has one
    pub fallback_exchange_rate: f64,
    /// `[scenario]`
    pub scenario: ScenarioSection,
    /// `[risk]`
    pub risk: RiskSection,
    /// `[market]`
    pub market: MarketSection,
    /// `[forecast]`
    pub forecast: ForecastSection,
    /// `[assistant]`
    pub assistant: AssistantSection,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: LogLevel::Info,
            environment: Environment::Development,
            data_path: PathBuf::from("data/tariff_prices_with_currency_codes.csv"),
            fallback_exchange_rate: 1_300.0,
            scenario: ScenarioSection::default(),
            risk: RiskSection::default(),
            market: MarketSection::default(),
            forecast: ForecastSection::default(),
            assistant: AssistantSection::default(),
        }
    }
}

impl ToolkitConfig {
    /// Create a new ToolkitConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: ToolkitConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port));
        }
        if !(self.fallback_exchange_rate.is_finite() && self.fallback_exchange_rate > 0.0) {
            return Err(ConfigError::invalid(
                "fallback_exchange_rate",
                "must be a positive number",
            ));
        }
        for (field, value) in [
            ("scenario.tariff_delta", self.scenario.tariff_delta),
            ("scenario.exchange_delta", self.scenario.exchange_delta),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::invalid(field, "must be non-negative"));
            }
        }
        for (field, value) in [
            ("forecast.alpha", self.forecast.alpha),
            ("forecast.beta", self.forecast.beta),
            ("assistant.fuzzy_threshold", self.assistant.fuzzy_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::invalid(field, "must be in (0, 1]"));
            }
        }
        if self.forecast.lookback_days == 0 {
            return Err(ConfigError::invalid("forecast.lookback_days", "must be at least 1"));
        }
        if self.risk.window_days == 0 {
            return Err(ConfigError::invalid("risk.window_days", "must be at least 1"));
        }
        self.risk.volatility_policy()?;
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Settings for the question-answering assistant.
    pub fn assistant_settings(&self) -> AssistantSettings {
        AssistantSettings {
            tariff_delta: self.scenario.tariff_delta,
            exchange_delta: self.scenario.exchange_delta,
            fallback_exchange_rate: self.fallback_exchange_rate,
            extractor: self.assistant.extractor,
            fuzzy_threshold: self.assistant.fuzzy_threshold,
        }
    }
}
