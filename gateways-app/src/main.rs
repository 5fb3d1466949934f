//! # Gateways Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the settings reader and bank registry
//! - Create the bank factory
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateways_adapters::build_reader;
use gateways_hex::{BankFactory, BankRegistry, inbound::HttpServer};

use config::LogFormat;

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,gateways_app=debug,gateways_hex=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting gateways server on port {}", config.port);
    tracing::info!("Using settings: {}", config.settings_path.display());

    // Build the settings reader (validates every configured account)
    let reader = build_reader(&config.settings_path)?;

    let registry = BankRegistry::with_builtin_banks();
    tracing::info!(classes = ?registry.class_names(), "Bank registry ready");

    let factory = BankFactory::new(reader, registry);

    // Create and run the HTTP server
    let server = HttpServer::new(factory);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
