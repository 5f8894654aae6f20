use anyhow::Context;
use api_client::YahooClient;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use configuration::{Config, init_tracing, load_config};
use core_types::{with_weight, with_yield};
use indicatif::{ProgressBar, ProgressStyle};
use portfolio_backtester::PortfolioManager;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod display;

/// The main entry point for the income portfolio backtester.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // INCOME__* overrides may live in a .env file; it is optional.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = init_tracing(&config.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Allocations => {
            display::print_allocations(&config);
            Ok(())
        }
        Commands::Backtest(args) => handle_backtest(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Backtest and project a fixed-weight multi-asset income portfolio.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Missing files fall back to the defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the allocation table, total weight and estimated income.
    Allocations,
    /// Download history, run the backtest and project it forward.
    Backtest(BacktestArgs),
}

#[derive(Parser)]
struct BacktestArgs {
    /// The date the backtest ends on (format: YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Override the starting capital.
    #[arg(long)]
    start_value: Option<Decimal>,

    /// Change one weight, e.g. `--weight JEPI=0.2`. Repeatable.
    #[arg(long = "weight", value_parser = parse_edit)]
    weights: Vec<(String, Decimal)>,

    /// Change one yield estimate, e.g. `--yield BND=0.04`. Repeatable.
    #[arg(long = "yield", value_parser = parse_edit)]
    yields: Vec<(String, Decimal)>,

    /// Print one backtest/forecast row every N months.
    #[arg(long, default_value_t = 12)]
    sample_every: usize,

    /// Write the full derived state as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn parse_edit(raw: &str) -> Result<(String, Decimal), String> {
    let (symbol, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected SYMBOL=FRACTION, got '{}'", raw))?;
    let value = value
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid fraction '{}': {}", value, e))?;
    Ok((symbol.trim().to_ascii_uppercase(), value))
}

// ==============================================================================
// Backtest Command Logic
// ==============================================================================

/// Applies the edits, runs one full recomputation and prints the result.
async fn handle_backtest(args: BacktestArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(start_value) = args.start_value {
        config.portfolio.start_value = start_value;
        config.validate()?;
    }

    // Edits are folded into a single replacement of the whole table.
    let mut allocations = config.portfolio.allocations.clone();
    for (symbol, weight) in &args.weights {
        allocations = with_weight(&allocations, symbol, *weight)?;
    }
    for (symbol, yield_fraction) in &args.yields {
        allocations = with_yield(&allocations, symbol, *yield_fraction)?;
    }

    let now = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let source = YahooClient::new(&config.data).context("failed to build the HTTP client")?;
    let mut manager = PortfolioManager::new(config, Arc::new(source));

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Fetching price history...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = manager.replace_allocations(allocations, now).await;
    spinner.finish_and_clear();

    let state = result.context("backtest failed")?;

    display::print_fetch_status(state);
    display::print_summary(state);
    display::print_series(state, args.sample_every.max(1));

    if let Some(path) = args.json {
        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, state)?;
        tracing::info!(path = %path.display(), "Wrote derived state.");
    }

    Ok(())
}
