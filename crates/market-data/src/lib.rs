// In crates/market-data/src/lib.rs

use std::time::Duration;

use app_config::MarketDataSettings;
use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use core_types::{PricePoint, Symbol};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

pub mod error;
pub mod file;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use file::{load_price_file, save_price_file};
pub use types::*;

impl MarketDataClient {
    /// Constructs a new client from the market data settings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(MarketDataClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_retries: settings.max_retries,
            retry_delay: Duration::from_millis(settings.retry_delay_ms),
        })
    }

    /// Fetches daily adjusted close prices for `symbol` between `start` and `end`, inclusive.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    pub async fn get_daily_prices(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }

        let period1 = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive, so step past the end date.
        let period2 = end
            .checked_add_days(Days::new(1))
            .unwrap_or(end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.base_url, symbol.0, period1, period2
        );

        tracing::info!(symbol = %symbol, %start, %end, "Fetching daily prices.");
        let body = self.get_with_retry(&url).await?;
        let points = parse_chart_response(symbol, &body)?;
        tracing::info!(symbol = %symbol, count = points.len(), "Received daily prices.");

        Ok(points)
    }

    async fn get_with_retry(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.get_text(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, max_retries = self.max_retries, error = %e, "Request failed, retrying.");
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let text = response.text().await.map_err(Error::RequestFailed)?;

        // Client errors still carry a JSON error object worth parsing.
        if status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: text.chars().take(200).collect(),
            });
        }

        Ok(text)
    }
}

/// Converts a raw chart response body into ordered daily price points.
///
/// Adjusted closes are preferred, plain closes are the fallback, and bars
/// with a `null` price are skipped. If Yahoo returns two bars on the same
/// calendar day (the live bar for today), the later one wins.
pub fn parse_chart_response(symbol: &Symbol, body: &str) -> Result<Vec<PricePoint>> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(Error::ApiError { code: error.code, msg: error.description });
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Err(Error::NoData { symbol: symbol.0.clone() });
    };

    let ChartResult { timestamp, indicators } = result;
    let adjusted = indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|prices| !prices.is_empty());
    let prices = match adjusted {
        Some(prices) => prices,
        None => indicators.quote.into_iter().next().map(|q| q.close).unwrap_or_default(),
    };

    let mut points: Vec<PricePoint> = Vec::with_capacity(timestamp.len());
    for (ts, price) in timestamp.into_iter().zip(prices) {
        let Some(price) = price.filter(|p| p.is_finite()).and_then(Decimal::from_f64) else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        match points.last_mut() {
            Some(last) if last.date == date => last.price = price,
            _ => points.push(PricePoint::new(date, price)),
        }
    }

    if points.is_empty() {
        return Err(Error::NoData { symbol: symbol.0.clone() });
    }

    Ok(points)
}
