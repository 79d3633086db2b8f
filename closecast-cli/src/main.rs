//! Closecast CLI — one-shot next-day closing-price forecast for a ticker.
//!
//! Fetches daily bars (Yahoo Finance by default, CSV or synthetic offline),
//! runs the forecast pipeline, and prints a summary or the full report as
//! JSON for downstream renderers.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use closecast_core::data::{CsvProvider, DataProvider, SyntheticProvider, YahooProvider};
use closecast_core::{ForecastConfig, Forecaster, RangeHint};

#[derive(Parser)]
#[command(
    name = "closecast",
    about = "Forecast the next trading day's closing price for a ticker"
)]
struct Cli {
    /// Ticker symbol (e.g. AAPL).
    ticker: String,

    /// Display-range hint for downstream plotting: 30days, 6months, 1year, max.
    #[arg(long, default_value = "max")]
    range: String,

    /// History start date (YYYY-MM-DD). Defaults to 2010-01-01.
    #[arg(long)]
    start: Option<String>,

    /// Path to a TOML config file (start date, lag depth, model settings).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read bars from a CSV file instead of Yahoo Finance.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Use deterministic synthetic bars (no network access).
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Seed for synthetic bars.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the full report as JSON instead of a summary.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ForecastConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ForecastConfig::default(),
    };
    if let Some(start) = &cli.start {
        config.start_date = start
            .parse::<NaiveDate>()
            .with_context(|| format!("invalid --start date '{start}'"))?;
    }

    let range: RangeHint = match cli.range.parse() {
        Ok(range) => range,
        Err(msg) => bail!(msg),
    };

    let provider: Arc<dyn DataProvider> = if let Some(path) = &cli.csv {
        Arc::new(CsvProvider::new(path))
    } else if cli.synthetic {
        Arc::new(SyntheticProvider::new(cli.seed))
    } else {
        Arc::new(YahooProvider::new())
    };

    println!(
        "Forecasting {} (provider: {}, history from {})...",
        cli.ticker,
        provider.name(),
        config.start_date
    );

    let forecaster = Forecaster::new(provider, config);
    let report = forecaster.forecast(&cli.ticker, range)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n=== {} ===", report.ticker);
    println!("Forecast date:   {}", report.forecast_date);
    println!(
        "Close estimate:  {:.2}  (interval {:.2} .. {:.2})",
        report.point, report.lower, report.upper
    );
    println!(
        "Model accuracy:  {}%  (MAPE {}%, R\u{b2} {})",
        report.metrics.accuracy_percent, report.metrics.mape, report.metrics.r2
    );
    println!(
        "Fitted window:   {} .. {}  ({} bars, range hint: {})",
        report.usable_from,
        report.usable_until,
        report.actuals.len(),
        report.range_hint.as_str()
    );

    Ok(())
}
