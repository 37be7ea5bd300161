// In crates/strategies/src/types.rs

use core_types::SignalSeries;
use serde::{Deserialize, Serialize};

use crate::moving_average::MovingAverageSeries;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    /// Window of the fast average.
    #[serde(default = "default_short_period")]
    pub short_period: u32,
    /// Window of the slow average. Must be larger than `short_period`.
    #[serde(default = "default_long_period")]
    pub long_period: u32,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_period: default_short_period(),
            long_period: default_long_period(),
        }
    }
}

fn default_short_period() -> u32 { 30 }
fn default_long_period() -> u32 { 100 }

/// Everything a crossover scan produces: both averages and the signal series,
/// all index-aligned with the input prices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub short_average: MovingAverageSeries,
    pub long_average: MovingAverageSeries,
    pub signals: SignalSeries,
}
