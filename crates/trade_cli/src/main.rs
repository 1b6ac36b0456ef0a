//! tradekit - tariff scenarios and exchange rates from the command line
//!
//! # Commands
//!
//! - `tradekit scenario` - Price the what-if menu for a base price, tariff and rate
//! - `tradekit routes` - List the route table
//! - `tradekit convert <CURRENCY>` - Convert every route at the latest USD rate
//! - `tradekit forecast <CURRENCY>` - Forecast the USD rate
//! - `tradekit ask <QUESTION>` - Answer a trade question
//! - `tradekit risk <INDEX>` - Tariff and volatility alerts for one route
//! - `tradekit heatmap` - Mean risk per exporter/importer pair
//! - `tradekit check` - Validate configuration and data

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trade_config::{build_config, CliArgs};
use trade_core::scenario::ScenarioInput;
use trade_market::ProviderKind;
use trade_routes::ExtractorKind;

mod commands;
mod error;
mod render;

pub use error::{CliError, Result};

use commands::risk::RiskOptions;
use commands::Context;
use render::OutputFormat;

/// Tariff scenario and exchange-rate toolkit
#[derive(Parser)]
#[command(name = "tradekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Route table CSV
    #[arg(long, global = true, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Exchange-rate provider (frankfurter, exchangerate_host)
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the what-if menu for a base price, tariff and exchange rate
    Scenario {
        /// Base price in USD
        #[arg(short, long)]
        base_price: f64,

        /// Tariff in percent
        #[arg(short, long)]
        tariff: f64,

        /// Local currency units per USD
        #[arg(short, long)]
        exchange: f64,

        /// Tariff delta (defaults to the configured one)
        #[arg(long)]
        tariff_delta: Option<f64>,

        /// Exchange delta (defaults to the configured one)
        #[arg(long)]
        exchange_delta: Option<f64>,
    },

    /// List the route table
    Routes,

    /// Convert every route's final price into a currency
    Convert {
        /// Target currency code
        currency: String,
    },

    /// Forecast the USD exchange rate for a currency
    Forecast {
        /// Target currency code
        currency: String,

        /// Number of trailing points to show
        #[arg(long, default_value_t = commands::forecast::DEFAULT_TAIL)]
        tail: usize,
    },

    /// Answer a free-text trade question
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Entity extractor (keyword, fuzzy)
        #[arg(long)]
        extractor: Option<ExtractorKind>,
    },

    /// Tariff and exchange-volatility alerts for one route
    Risk {
        /// Route index as listed by `tradekit routes`
        index: usize,
    },

    /// Mean risk score per exporter/importer pair
    Heatmap,

    /// Check configuration, data and (optionally) the rate provider
    Check {
        /// Also request a live rate
        #[arg(long)]
        online: bool,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let extractor = match &cli.command {
        Commands::Ask { extractor, .. } => *extractor,
        _ => None,
    };
    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.verbose.then(|| "debug".to_string()),
        data_path: cli.data.clone(),
        provider: cli.provider,
        extractor,
        ..Default::default()
    })?;

    init_tracing(config.log_level.as_filter_str());
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let ctx = Context::new(config);
    let format = cli.format;
    let output = match cli.command {
        Commands::Scenario {
            base_price,
            tariff,
            exchange,
            tariff_delta,
            exchange_delta,
        } => {
            let scenario = &ctx.config.scenario;
            let input = ScenarioInput::new(
                base_price,
                tariff,
                exchange,
                tariff_delta.unwrap_or(scenario.tariff_delta),
                exchange_delta.unwrap_or(scenario.exchange_delta),
            );
            commands::scenario::run(input, format)?
        }
        Commands::Routes => commands::routes::run(&ctx.table()?, format)?,
        Commands::Convert { currency } => {
            let provider = ctx.provider();
            commands::convert::run(&ctx.table()?, provider.as_ref(), &currency, format).await?
        }
        Commands::Forecast { currency, tail } => {
            let provider = ctx.provider();
            commands::forecast::run(
                &ctx.config.forecast.forecaster(),
                provider.as_ref(),
                &currency,
                ctx.today(),
                tail,
                format,
            )
            .await?
        }
        Commands::Ask { question, .. } => commands::ask::run(
            &ctx.table()?,
            ctx.config.assistant_settings(),
            &question.join(" "),
            format,
        )?,
        Commands::Risk { index } => {
            let risk = &ctx.config.risk;
            let options = RiskOptions {
                tariff: risk.tariff_policy(),
                volatility: risk.volatility_policy()?,
                window_days: risk.window_days,
                today: ctx.today(),
            };
            let provider = ctx.provider();
            commands::risk::run(&ctx.table()?, provider.as_ref(), index, &options, format).await?
        }
        Commands::Heatmap => commands::heatmap::run(
            &ctx.table()?,
            &ctx.config.risk.tariff_policy(),
            &ctx.config.risk.baseline_policy(),
            format,
        )?,
        Commands::Check { online } => {
            let provider = online.then(|| ctx.provider());
            commands::check::run(&ctx, provider.as_deref()).await?
        }
    };

    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scenario_with_global_flags() {
        let cli = Cli::try_parse_from([
            "tradekit", "scenario", "-b", "30000", "-t", "8", "-e", "1300", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Scenario { base_price, tariff_delta: None, .. } if base_price == 30_000.0
        ));
    }

    #[test]
    fn test_parse_ask_joins_words() {
        let cli = Cli::try_parse_from([
            "tradekit", "ask", "Korea", "to", "Germany", "cars", "--extractor", "fuzzy",
        ])
        .unwrap();
        let Commands::Ask { question, extractor } = cli.command else {
            panic!("Expected ask");
        };
        assert_eq!(question.join(" "), "Korea to Germany cars");
        assert_eq!(extractor, Some(ExtractorKind::Fuzzy));
    }

    #[test]
    fn test_parse_provider() {
        let cli = Cli::try_parse_from(["tradekit", "--provider", "exchangerate.host", "convert", "EUR"])
            .unwrap();
        assert_eq!(cli.provider, Some(ProviderKind::ExchangerateHost));
    }
}
