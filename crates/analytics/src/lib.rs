// In crates/analytics/src/lib.rs

pub mod engine;
pub mod types;

pub use engine::{TradePairer, gain_loss_percent};
pub use types::{Polarity, Trade, TradeBook};
