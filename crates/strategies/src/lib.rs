// In crates/strategies/src/lib.rs

use core_types::PriceSeries;

pub mod error;
pub mod ma_crossover;
pub mod moving_average;
pub mod types;

pub use error::{Error, Result};
pub use ma_crossover::{MACrossover, TrendState, detect_signals};
pub use moving_average::{MovingAverageSeries, simple_moving_average};
pub use types::{Detection, MACrossoverSettings};

/// The universal interface for a signal-producing strategy.
///
/// A strategy scans a complete, validated price history in one pass and
/// produces one signal per price point. It holds no state between calls, so
/// running it twice over the same series gives identical output.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn detect(&self, series: &PriceSeries) -> Result<Detection>;
}
