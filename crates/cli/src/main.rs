//! Command Line Interface for liquidity provider returns.
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use lp_returns_data::prelude::*;
use lp_returns_domain::history::HistoricalReturn;
use lp_returns_domain::time::SECONDS_PER_DAY;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use tracing::info;

#[derive(Parser)]
#[command(name = "lp-returns")]
#[command(about = "Liquidity provider return attribution for DEX pools", long_about = None)]
struct Cli {
    /// Network to query (mainnet, xdai, arbitrum-one)
    #[arg(short, long, global = true, default_value = "mainnet")]
    network: Network,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lifetime returns of a provider on one pair
    Returns {
        /// Provider address
        #[arg(short, long)]
        user: String,

        /// Pair address
        #[arg(short, long)]
        pair: String,
    },
    /// Day-by-day value and cumulative fees of a provider on one pair
    History {
        /// Provider address
        #[arg(short, long)]
        user: String,

        /// Pair address
        #[arg(short, long)]
        pair: String,

        /// First day to track (YYYY-MM-DD); defaults to `days` ago
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Days of history when no start date is given
        #[arg(short, long, default_value_t = 30)]
        days: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let registry = ClientRegistry::from_env()?;
    let service = ReturnsService::new(registry.get(cli.network)?);
    info!(network = %cli.network, "Using subgraph clients");

    match &cli.command {
        Commands::Returns { user, pair } => {
            println!("📡 Fetching position data on {}...", cli.network);
            let returns = service
                .lp_returns_for_user(user, pair)
                .await
                .with_context(|| format!("failed to compute returns for {user} on {pair}"))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&returns)?);
                return Ok(());
            }

            println!("\n📊 Lifetime Returns");
            println!("════════════════════════════════════");
            println!("Principal (USD):  ${:.2}", returns.principal.usd);
            println!("Principal token0: {:.6}", returns.principal.amount0);
            println!("Principal token1: {:.6}", returns.principal.amount1);
            println!("Net Return:       ${:.2}", returns.net.value);
            println!("Swapr Return:     ${:.2}", returns.swapr.value);
            println!("Fees Earned:      ${:.2}", returns.fees.sum);
            println!("════════════════════════════════════");
        }
        Commands::History {
            user,
            pair,
            start_date,
            days,
        } => {
            let now = current_timestamp();
            let start_timestamp = match start_date {
                Some(date) => {
                    let start = date.and_time(NaiveTime::MIN).and_utc().timestamp();
                    u64::try_from(start).context("start date is before the unix epoch")?
                }
                None => now.saturating_sub(*days * SECONDS_PER_DAY),
            };

            println!("📡 Fetching pair and snapshots on {}...", cli.network);
            let query = service.query();
            let pool = query.fetch_pool(pair).await?;
            let native_currency_price = query.fetch_native_currency_price().await?;
            let user_snapshots = query.fetch_user_snapshots(user).await?;

            let history = service
                .historical_pair_returns(
                    start_timestamp,
                    now,
                    &pool,
                    &user_snapshots,
                    native_currency_price,
                )
                .await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&history)?);
                return Ok(());
            }

            print_history(&history);
        }
    }

    Ok(())
}

fn print_history(history: &[HistoricalReturn]) {
    if history.is_empty() {
        println!("❌ No history for the specified period.");
        return;
    }

    let mut table = Table::new();
    table.add_row(row!["Date", "Value (USD)", "Fees (USD)"]);
    for point in history {
        let date = chrono::DateTime::from_timestamp(point.date as i64, 0).unwrap_or_default();
        table.add_row(row![
            date.format("%Y-%m-%d"),
            format!("{:.2}", point.usd_value),
            format!("{:.2}", point.fees)
        ]);
    }
    table.printstd();

    let total_fees = history.last().map(|p| p.fees).unwrap_or(Decimal::ZERO);
    println!("\n✅ {} days, {:.2} USD in fees", history.len(), total_fees);
}
