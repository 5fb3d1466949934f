//! Gateways CLI
//!
//! Runs the bank factory locally against a settings file, to check which
//! gateway a merchant would get without starting the server.

use anyhow::Result;
use clap::{Parser, Subcommand};

use gateways_adapters::{SettingsReader, build_reader};
use gateways_hex::{BankFactory, BankRegistry, inbound::HttpRequestContext};
use gateways_types::{
    Amount, AutoCreateResponse, BankResponse, BankType, GatewayError, Identifier,
    SecretValueReader,
};

#[derive(Parser)]
#[command(name = "gateways")]
#[command(author, version, about = "Bank gateway selection CLI", long_about = None)]
struct Cli {
    /// Path to the gateway settings JSON file
    #[arg(long, env = "GATEWAYS_SETTINGS")]
    settings: String,

    /// Public base URL used to build callback URLs
    #[arg(
        long,
        env = "GATEWAYS_BASE_URL",
        default_value = "http://localhost:3000"
    )]
    base_url: String,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a bank (the merchant's default when --bank is omitted)
    Create {
        /// Bank type, e.g. ZARINPAL
        #[arg(long)]
        bank: Option<String>,
        #[arg(long, default_value = "1")]
        identifier: String,
    },
    /// Pick the first reachable bank by priority
    Auto {
        #[arg(long, default_value = "1")]
        identifier: String,
        /// Amount in the merchant's currency
        #[arg(long)]
        amount: Option<i64>,
    },
    /// Show configured merchant accounts
    Accounts,
    /// List registered bank classes
    Banks,
}

fn parse_identifier(s: &str) -> Result<Identifier> {
    s.parse()
        .map_err(|e| anyhow::anyhow!("Invalid identifier {:?}: {}", s, e))
}

fn request_context(base_url: &str) -> HttpRequestContext {
    let (scheme, host) = base_url.split_once("://").unwrap_or(("http", base_url));
    HttpRequestContext::new(scheme, host.trim_end_matches('/'))
}

fn account_summary(reader: &SettingsReader, identifier: &Identifier) -> Result<serde_json::Value> {
    Ok(serde_json::json!({
        "identifier": identifier,
        "default": reader.default(identifier)?,
        "currency": reader.currency(identifier)?,
        "bank_priorities": reader.get_bank_priorities(identifier)?,
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("gateways_hex=debug,gateways_adapters=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let reader = build_reader(&cli.settings)?;
    let factory = BankFactory::new(reader, BankRegistry::with_builtin_banks());
    let ctx = request_context(&cli.base_url);

    match cli.command {
        Commands::Create { bank, identifier } => {
            let identifier = parse_identifier(&identifier)?;
            let bank_type = bank.map(|b| b.parse::<BankType>()).transpose()?;
            let bank = factory.create(&ctx, bank_type, &identifier)?;
            let response = BankResponse::from_bank(bank.as_ref());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Commands::Auto { identifier, amount } => {
            let identifier = parse_identifier(&identifier)?;
            let amount = match amount {
                Some(value) => Some(Amount::new(value, factory.reader().currency(&identifier)?)?),
                None => None,
            };

            match factory
                .auto_create_with_report(&ctx, &identifier, amount)
                .await
            {
                Ok((bank, attempts)) => {
                    let response = AutoCreateResponse {
                        bank: BankResponse::from_bank(bank.as_ref()),
                        attempts,
                    };
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Err(GatewayError::AutoConnectionFailed(report)) => {
                    eprintln!("✗ No gateway could connect for identifier {}", identifier);
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Accounts => {
            let reader = factory.reader();
            let accounts = reader
                .identifiers()
                .iter()
                .map(|id| account_summary(reader, id))
                .collect::<Result<Vec<_>>>()?;
            println!("{}", serde_json::to_string_pretty(&accounts)?);
        }

        Commands::Banks => {
            for class in factory.registry().class_names() {
                println!("{}", class);
            }
        }
    }

    Ok(())
}
