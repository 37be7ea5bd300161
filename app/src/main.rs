// In app/src/main.rs

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use app_config::Settings;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use core_types::{PricePoint, PriceSeries, Symbol};
use market_data::MarketDataClient;
use pipeline::Analyzer;
use tracing_subscriber::prelude::*;

mod report;

const DEFAULT_START_DATE: &str = "2015-01-01";

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Dual moving-average crossover signal analyzer.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Detects crossover signals and prices the resulting trades.
    Analyze {
        /// The stock symbol to analyze (e.g., "AAPL").
        #[arg(short, long, default_value = "AAPL")]
        symbol: String,

        /// Start date, YYYY-MM-DD or YYYYmmdd. Defaults to 2015-01-01 when fetching.
        #[arg(long)]
        start_date: Option<String>,

        /// End date, YYYY-MM-DD or YYYYmmdd. Defaults to today when fetching.
        #[arg(long)]
        end_date: Option<String>,

        /// Read prices from a JSON file instead of fetching them.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full analysis as JSON instead of the text report.
        #[arg(long)]
        json: bool,

        /// Also write the JSON analysis to this file for a chart renderer.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Downloads daily prices into a file usable with `analyze --input`.
    Fetch {
        /// The stock symbol to download (e.g., "AAPL").
        #[arg(short, long)]
        symbol: String,

        /// Start date, YYYY-MM-DD or YYYYmmdd.
        #[arg(long, default_value = DEFAULT_START_DATE)]
        start_date: String,

        /// End date, YYYY-MM-DD or YYYYmmdd. Defaults to today.
        #[arg(long)]
        end_date: Option<String>,

        /// Destination JSON file.
        #[arg(short, long)]
        output: PathBuf,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let settings = app_config::load_settings().context("Failed to load configuration")?;
    init_tracing(&settings.app.log_level);

    // Parse command-line arguments.
    let cli = Cli::parse();

    tracing::info!(environment = %settings.app.environment, "Starting crossover analyzer");

    match cli.command {
        Commands::Analyze {
            symbol,
            start_date,
            end_date,
            input,
            json,
            output,
        } => {
            handle_analyze(&settings, symbol, start_date, end_date, input, json, output).await?;
        }
        Commands::Fetch {
            symbol,
            start_date,
            end_date,
            output,
        } => {
            handle_fetch(&settings, symbol, start_date, end_date, &output).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = tracing::Level::from_str(log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new()
            .with_target("reqwest", tracing::Level::WARN) // Quiet the HTTP stack
            .with_target("hyper", tracing::Level::WARN)
            .with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Accepts ISO dates and the compact `YYYYmmdd` form.
fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y%m%d"))
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", value, e))
}

fn resolve_range(start_date: Option<&str>, end_date: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(start_date.unwrap_or(DEFAULT_START_DATE))?;
    let end = match end_date {
        Some(value) => parse_date(value)?,
        None => Local::now().date_naive(),
    };
    if end < start {
        anyhow::bail!("End date {} is before start date {}", end, start);
    }
    Ok((start, end))
}

/// Keeps points inside `[start, end]`; bounds that are `None` are open.
fn clip_to_range(points: Vec<PricePoint>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<PricePoint> {
    points
        .into_iter()
        .filter(|p| start.is_none_or(|s| p.date >= s) && end.is_none_or(|e| p.date <= e))
        .collect()
}

// --- "Analyze" Subcommand Logic ---

async fn handle_analyze(
    settings: &Settings,
    symbol_str: String,
    start_date: Option<String>,
    end_date: Option<String>,
    input: Option<PathBuf>,
    json: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let symbol = Symbol(symbol_str.to_uppercase());

    // --- 1. Load Prices ---
    let points = match input {
        Some(path) => {
            let start = start_date.as_deref().map(parse_date).transpose()?;
            let end = end_date.as_deref().map(parse_date).transpose()?;
            let points = market_data::load_price_file(&path)
                .with_context(|| format!("Failed to read prices from {}", path.display()))?;
            tracing::info!(path = %path.display(), count = points.len(), "Loaded prices from file.");
            clip_to_range(points, start, end)
        }
        None => {
            let (start, end) = resolve_range(start_date.as_deref(), end_date.as_deref())?;
            let client = MarketDataClient::new(&settings.market_data)?;
            client.get_daily_prices(&symbol, start, end).await?
        }
    };

    let series = PriceSeries::new(points).context("Price data is malformed")?;

    // --- 2. Run the Analysis ---
    let analyzer = Analyzer::new(settings.strategy)?;
    let report = analyzer.run(&symbol, &series)?;

    // --- 3. Hand Off to Presentation ---
    if let Some(path) = output {
        std::fs::write(&path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Analysis written.");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report::print_report(&report)?;
    }

    Ok(())
}

// --- "Fetch" Subcommand Logic ---

async fn handle_fetch(
    settings: &Settings,
    symbol_str: String,
    start_date: String,
    end_date: Option<String>,
    output: &Path,
) -> Result<()> {
    let symbol = Symbol(symbol_str.to_uppercase());
    let (start, end) = resolve_range(Some(start_date.as_str()), end_date.as_deref())?;

    let client = MarketDataClient::new(&settings.market_data)?;
    let points = client.get_daily_prices(&symbol, start, end).await?;

    market_data::save_price_file(output, &points)
        .with_context(|| format!("Failed to write prices to {}", output.display()))?;
    tracing::info!(symbol = %symbol, count = points.len(), path = %output.display(), "Prices saved.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_both_date_forms() {
        assert_eq!(parse_date("2015-01-01").unwrap(), date(2015, 1, 1));
        assert_eq!(parse_date("20150101").unwrap(), date(2015, 1, 1));
        assert!(parse_date("01/01/2015").is_err());
    }

    #[test]
    fn range_defaults_and_validation() {
        let (start, end) = resolve_range(None, Some("2016-06-30")).unwrap();
        assert_eq!((start, end), (date(2015, 1, 1), date(2016, 6, 30)));

        assert!(resolve_range(Some("2020-01-02"), Some("2020-01-01")).is_err());
    }

    #[test]
    fn clipping_keeps_inclusive_bounds() {
        let points: Vec<PricePoint> = (1..=5)
            .map(|d| PricePoint::new(date(2020, 1, d), dec!(1)))
            .collect();

        let clipped = clip_to_range(points.clone(), Some(date(2020, 1, 2)), Some(date(2020, 1, 4)));
        let days: Vec<NaiveDate> = clipped.iter().map(|p| p.date).collect();
        assert_eq!(days, vec![date(2020, 1, 2), date(2020, 1, 3), date(2020, 1, 4)]);

        assert_eq!(clip_to_range(points.clone(), None, None), points);
    }

    #[test]
    fn cli_parses_analyze_defaults() {
        let cli = Cli::try_parse_from(["crossover", "analyze"]).unwrap();
        match cli.command {
            Commands::Analyze { symbol, start_date, json, input, .. } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(start_date, None);
                assert!(!json);
                assert!(input.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
