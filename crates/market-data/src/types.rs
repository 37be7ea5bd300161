// In crates/market-data/src/types.rs

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

/// Client for the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL, e.g. `https://query1.finance.yahoo.com`.
    pub base_url: String,
    /// Extra attempts after a transient failure.
    pub max_retries: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
}

/// Top-level envelope of a `/v8/finance/chart` response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Yahoo reports failures inside a 200 or 404 body rather than as a bare status.
#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// UNIX seconds, one per bar.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
    #[serde(default)]
    pub adjclose: Vec<AdjClose>,
}

/// Raw quote arrays. Missing bars come back as `null`.
#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct AdjClose {
    #[serde(default)]
    pub adjclose: Vec<Option<f64>>,
}
