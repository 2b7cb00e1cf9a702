//! Landed-cost CLI
//!
//! Ranks the supplier offers of an RFQ by their landed cost in DZD:
//! - Load configuration from environment
//! - Load the offer/rate snapshot into the repository adapter
//! - Run the comparison service
//! - Print a table or the JSON report

mod config;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pricing_hex::ComparisonService;
use pricing_repo::build_repo;
use pricing_types::{CostParameters, MissingRatePolicy, PriceComparator, RfqId};

#[derive(Parser)]
#[command(name = "landed-cost")]
#[command(author, version, about = "Compare supplier offers by landed cost", long_about = None)]
struct Cli {
    /// JSON snapshot holding exchange rates and supplier offers, before or
    /// after the subcommand
    #[arg(long, short, global = true, env = "LANDED_COST_SNAPSHOT")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the offers of one RFQ
    Compare {
        /// RFQ identifier, e.g. RFQ-2024-001
        #[arg(long)]
        rfq: String,
        /// Customs duty in percent
        #[arg(long, env = "LANDED_COST_CUSTOMS_PERCENT", default_value = "15")]
        customs: Decimal,
        /// VAT in percent
        #[arg(long, env = "LANDED_COST_TAX_PERCENT", default_value = "19")]
        tax: Decimal,
        /// Fixed additional fees in DZD
        #[arg(long, env = "LANDED_COST_ADDITIONAL_FEE", default_value = "50000")]
        fee: Decimal,
        /// What to do with offers whose currency has no exchange rate
        #[arg(
            long,
            env = "LANDED_COST_MISSING_RATE",
            value_enum,
            default_value_t = MissingRate::Reject
        )]
        missing_rate: MissingRate,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// List the RFQs in the snapshot
    Rfqs,
}

#[derive(Clone, Copy, ValueEnum)]
enum MissingRate {
    /// Leave the offer out and report it
    Reject,
    /// Price it with the configured fallback rate
    Fallback,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,pricing_hex=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = config::Config::from_env()?;

    let input = cli
        .input
        .context("no snapshot given, pass --input or set LANDED_COST_SNAPSHOT")?;
    let repo = build_repo(&input).await?;
    tracing::debug!(input = %input.display(), "snapshot loaded");

    match cli.command {
        Commands::Rfqs => {
            let service = ComparisonService::new(repo, PriceComparator::default());
            for rfq in service.list_rfqs().await? {
                println!("{}", rfq);
            }
        }

        Commands::Compare {
            rfq,
            customs,
            tax,
            fee,
            missing_rate,
            format,
        } => {
            let params = CostParameters::new(customs, tax, fee)?;
            let policy = match missing_rate {
                MissingRate::Reject => MissingRatePolicy::Reject,
                MissingRate::Fallback => MissingRatePolicy::Fallback(config.fallback_rates),
            };

            let service = ComparisonService::new(repo, PriceComparator::new(policy));
            let report = service.compare_rfq(&RfqId::new(rfq), &params).await?;

            match format {
                Format::Table => print!("{}", render::render_report(&report)?),
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
    }

    Ok(())
}
