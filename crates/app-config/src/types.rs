// In crates/app-config/src/types.rs

use serde::Deserialize;

pub use strategies::types::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    #[serde(default)]
    pub app: AppSettings,
    /// Settings for the historical price source.
    #[serde(default)]
    pub market_data: MarketDataSettings,
    /// Window sizes for the crossover strategy.
    #[serde(default)]
    pub strategy: MACrossoverSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    #[serde(default = "default_environment")]
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// Base URL of the Yahoo Finance chart API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra attempts after a failed request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Pause between attempts.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Yahoo rejects requests without a browser-like user agent.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Helper functions for serde defaults
fn default_environment() -> String { "development".into() }
fn default_log_level() -> String { "info".into() }
fn default_base_url() -> String { "https://query1.finance.yahoo.com".into() }
fn default_timeout_secs() -> u64 { 30 }
fn default_max_retries() -> u32 { 3 }
fn default_retry_delay_ms() -> u64 { 500 }
fn default_user_agent() -> String { "Mozilla/5.0 (compatible; crossover/0.1)".into() }
