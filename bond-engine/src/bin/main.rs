use std::sync::Arc;

use bond_engine::{demo, BondDuration, BondEngineConfig, SystemClock};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use common::model::network::NetworkId;
use common::model::token::TokenInfo;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bond Engine CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List live bonds from the demo depository
    List {
        /// Network name or chain id
        #[arg(short, long)]
        network: Option<String>,

        /// Sort order
        #[arg(short, long, value_enum, default_value_t = SortBy::Id)]
        sort: SortBy,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Id,
    Discount,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("bond_engine={}", cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BondEngineConfig::from_env();

    match cli.command {
        Commands::List { network, sort, json } => {
            let network = match network {
                Some(name) => name.parse::<NetworkId>()?,
                None => config.default_network,
            };

            info!("Listing bonds on {}", network);

            let demo = demo::seed(Utc::now());
            let fetcher = demo.fetcher(Arc::new(SystemClock));

            let mut bonds = match fetcher.fetch_bonds(network).await {
                Ok(bonds) => bonds,
                Err(err) => {
                    error!("Failed to fetch bonds: {}", err);
                    return Err(err.into());
                }
            };

            match sort {
                SortBy::Id => bonds.sort_by_key(|bond| bond.id),
                SortBy::Discount => bonds.sort_by(|a, b| b.discount.cmp(&a.discount)),
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&bonds)?);
                return Ok(());
            }

            println!(
                "{:>4}  {:<12} {:>14} {:>12} {:>10}  {:<9} {}",
                "ID", "QUOTE", "PRICE (USD)", "DISCOUNT", "DURATION", "TERM", "STATUS"
            );
            for bond in &bonds {
                println!(
                    "{:>4}  {:<12} {:>14} {:>11.2}% {:>10}  {:<9} {}",
                    bond.id,
                    bond.quote_token.symbol(),
                    bond.price.in_usd.round_dp(4),
                    bond.discount * rust_decimal::Decimal::ONE_HUNDRED,
                    BondDuration::render(Some(bond.duration)).label(),
                    if bond.is_fixed_term { "fixed" } else { "expiring" },
                    if bond.is_sold_out { "sold out" } else { "open" },
                );
            }
        }
    }

    Ok(())
}
