// In crates/strategies/src/moving_average.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};

/// A simple moving average aligned 1:1 with the prices it was computed from.
///
/// The first `window - 1` positions are `None` because there is not yet enough
/// history to fill the window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageSeries {
    window: usize,
    values: Vec<Option<Decimal>>,
}

impl MovingAverageSeries {
    /// Wraps precomputed values. Mostly useful for feeding the detector directly.
    pub fn from_values(window: usize, values: Vec<Option<Decimal>>) -> Self {
        Self { window, values }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn values(&self) -> &[Option<Decimal>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The average at `index`, or `None` if undefined or out of range.
    pub fn get(&self, index: usize) -> Option<Decimal> {
        self.values.get(index).copied().flatten()
    }

    /// Index of the first defined value.
    pub fn first_defined(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

/// Computes the `window`-period simple moving average of `prices`.
///
/// Every defined position is the mean of its own trailing window, so equal
/// windows always produce equal averages. A series shorter than the window is
/// not an error: every position is simply undefined.
pub fn simple_moving_average(prices: &[Decimal], window: usize) -> Result<MovingAverageSeries> {
    if window == 0 {
        return Err(Error::InvalidWindow(window));
    }
    let divisor = Decimal::from(window);

    let warm_up = prices.len().min(window - 1);
    let values = std::iter::repeat_n(None, warm_up)
        .chain(
            prices
                .windows(window)
                .map(|trailing| Some(trailing.iter().sum::<Decimal>() / divisor)),
        )
        .collect();

    Ok(MovingAverageSeries { window, values })
}
