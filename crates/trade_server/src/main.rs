//! Trade toolkit server
//!
//! JSON HTTP API over the route table and exchange-rate providers.

use clap::Parser;
use std::path::PathBuf;
use trade_config::{build_config, CliArgs as ConfigCliArgs};
use trade_market::ProviderKind;
use trade_routes::ExtractorKind;
use trade_server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Trade toolkit server - JSON API for tariff scenarios and exchange rates
#[derive(Parser, Debug)]
#[command(name = "tradekit-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Route table CSV
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Exchange-rate provider (frankfurter, exchangerate_host)
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// Question extractor (keyword, fuzzy)
    #[arg(long)]
    extractor: Option<ExtractorKind>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            data_path: args.data,
            provider: args.provider,
            extractor: args.extractor,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str());

    tracing::info!("Trade toolkit server v{}", trade_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        data_path = %config.data_path.display(),
        provider = %config.market.provider,
        extractor = %config.assistant.extractor,
        "Server configuration loaded"
    );

    let server = Server::from_config(config)?;
    tracing::info!(address = %server.socket_addr()?, "Starting server");

    server.run().await?;

    Ok(())
}
