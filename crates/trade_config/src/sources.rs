//! Environment and CLI layers on top of the file configuration.

use std::path::PathBuf;
use std::str::FromStr;

use trade_market::provider::ProviderKind;
use trade_routes::ExtractorKind;

use crate::config::ToolkitConfig;
use crate::error::ConfigError;
use crate::levels::{Environment, LogLevel};

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Host address override
    pub host: Option<String>,
    /// Port override
    pub port: Option<u16>,
    /// Log level override
    pub log_level: Option<String>,
    /// Route table override
    pub data_path: Option<PathBuf>,
    /// Rate provider override
    pub provider: Option<ProviderKind>,
    /// Extraction strategy override
    pub extractor: Option<ExtractorKind>,
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not a valid number", name, value)))
}

impl ToolkitConfig {
    /// Override fields from `TRADEKIT_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup
    pub fn apply_env_with<F>(&mut self, get: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = get("TRADEKIT_HOST") {
            self.host = host;
        }
        if let Some(port) = get("TRADEKIT_PORT") {
            self.port = parse_number("TRADEKIT_PORT", &port)?;
        }
        if let Some(level) = get("TRADEKIT_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(env) = get("TRADEKIT_ENV") {
            self.environment = Environment::from_str(&env)?;
        }
        if let Some(path) = get("TRADEKIT_DATA_PATH") {
            self.data_path = PathBuf::from(path);
        }
        if let Some(rate) = get("TRADEKIT_FALLBACK_RATE") {
            self.fallback_exchange_rate = parse_number("TRADEKIT_FALLBACK_RATE", &rate)?;
        }
        if let Some(delta) = get("TRADEKIT_TARIFF_DELTA") {
            self.scenario.tariff_delta = parse_number("TRADEKIT_TARIFF_DELTA", &delta)?;
        }
        if let Some(delta) = get("TRADEKIT_EXCHANGE_DELTA") {
            self.scenario.exchange_delta = parse_number("TRADEKIT_EXCHANGE_DELTA", &delta)?;
        }
        if let Some(ttl) = get("TRADEKIT_CACHE_TTL") {
            self.market.cache_ttl_secs = parse_number("TRADEKIT_CACHE_TTL", &ttl)?;
        }
        if let Some(provider) = get("TRADEKIT_RATE_PROVIDER") {
            self.market.provider = ProviderKind::from_str(&provider).map_err(ConfigError::EnvError)?;
        }
        if let Some(policy) = get("TRADEKIT_VOLATILITY_POLICY") {
            self.risk.volatility_policy = policy.trim().to_lowercase();
        }
        if let Some(extractor) = get("TRADEKIT_EXTRACTOR") {
            self.assistant.extractor = ExtractorKind::from_str(&extractor)
                .map_err(|e| ConfigError::EnvError(e.to_string()))?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(log_level) = &cli.log_level {
            match LogLevel::from_str(log_level) {
                Ok(level) => self.log_level = level,
                Err(e) => tracing::warn!(error = %e, "Ignoring log level override"),
            }
        }
        if let Some(path) = &cli.data_path {
            self.data_path = path.clone();
        }
        if let Some(provider) = cli.provider {
            self.market.provider = provider;
        }
        if let Some(extractor) = cli.extractor {
            self.assistant.extractor = extractor;
        }
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<ToolkitConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

fn build_config_with<F>(cli: &CliArgs, get: F) -> Result<ToolkitConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        ToolkitConfig::from_file(config_path)?
    } else {
        ToolkitConfig::default()
    };

    config.apply_env_with(get)?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ToolkitConfig::default();
        config
            .apply_env_with(env(&[
                ("TRADEKIT_PORT", "9090"),
                ("TRADEKIT_LOG_LEVEL", "warning"),
                ("TRADEKIT_ENV", "prod"),
                ("TRADEKIT_FALLBACK_RATE", "1350"),
                ("TRADEKIT_TARIFF_DELTA", "2"),
                ("TRADEKIT_RATE_PROVIDER", "exchangerate.host"),
                ("TRADEKIT_VOLATILITY_POLICY", "Scaled_Absolute"),
                ("TRADEKIT_EXTRACTOR", "fuzzy"),
                ("TRADEKIT_CACHE_TTL", "0"),
            ]))
            .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.environment.is_production());
        assert_eq!(config.fallback_exchange_rate, 1_350.0);
        assert_eq!(config.scenario.tariff_delta, 2.0);
        assert_eq!(config.scenario.exchange_delta, 100.0);
        assert_eq!(config.market.provider, ProviderKind::ExchangerateHost);
        assert_eq!(config.risk.volatility_policy, "scaled_absolute");
        assert_eq!(config.assistant.extractor, ExtractorKind::Fuzzy);
        assert_eq!(config.market.cache_ttl_secs, 0);
    }

    #[test]
    fn test_env_rejects_garbage() {
        let mut config = ToolkitConfig::default();
        match config.apply_env_with(env(&[("TRADEKIT_PORT", "http")])) {
            Err(ConfigError::EnvError(msg)) => assert!(msg.contains("TRADEKIT_PORT=http")),
            other => panic!("Expected EnvError, got {:?}", other),
        }
        assert!(matches!(
            config.apply_env_with(env(&[("TRADEKIT_PORT", "70000")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            config.apply_env_with(env(&[("TRADEKIT_EXCHANGE_DELTA", "a lot")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            config.apply_env_with(env(&[("TRADEKIT_RATE_PROVIDER", "ecb")])),
            Err(ConfigError::EnvError(_))
        ));
        assert!(matches!(
            config.apply_env_with(env(&[("TRADEKIT_EXTRACTOR", "spacy")])),
            Err(ConfigError::EnvError(_))
        ));
    }

    #[test]
    fn test_cli_overrides_env_and_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host = \"10.0.0.1\"\nport = 7000\n[assistant]\nextractor = \"fuzzy\"").unwrap();

        let cli = CliArgs {
            config_file: Some(file.path().to_path_buf()),
            port: Some(7100),
            data_path: Some(PathBuf::from("/tmp/routes.csv")),
            extractor: Some(ExtractorKind::Keyword),
            ..Default::default()
        };
        let config = build_config_with(
            &cli,
            env(&[("TRADEKIT_PORT", "7050"), ("TRADEKIT_HOST", "127.0.0.1")]),
        )
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 7100);
        assert_eq!(config.data_path, PathBuf::from("/tmp/routes.csv"));
        assert_eq!(config.assistant.extractor, ExtractorKind::Keyword);
    }

    #[test]
    fn test_invalid_cli_log_level_is_ignored() {
        let mut config = ToolkitConfig::default();
        config.merge_with_cli(&CliArgs {
            log_level: Some("loud".into()),
            ..Default::default()
        });
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_build_config_validates_final_result() {
        let err = build_config_with(
            &CliArgs::default(),
            env(&[("TRADEKIT_FALLBACK_RATE", "-5")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("fallback_exchange_rate"));
    }
}
