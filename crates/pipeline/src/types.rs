// In crates/pipeline/src/types.rs

use analytics::TradeBook;
use chrono::NaiveDate;
use core_types::{PriceSeries, Signal, Symbol};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use strategies::{Detection, MovingAverageSeries};

/// Chart-ready columns, all the same length as the input price series.
///
/// `buy_signals[i]` / `sell_signals[i]` hold the price at index `i` when a
/// signal fired there and `None` otherwise, so a renderer can scatter them
/// straight onto the price line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<Decimal>,
    pub short_average: Vec<Option<f64>>,
    pub long_average: Vec<Option<f64>>,
    pub buy_signals: Vec<Option<Decimal>>,
    pub sell_signals: Vec<Option<Decimal>>,
}

impl ChartSeries {
    pub fn new(series: &PriceSeries, detection: &Detection) -> Self {
        let signals = detection.signals.points();
        Self {
            dates: series.points().iter().map(|p| p.date).collect(),
            prices: series.points().iter().map(|p| p.price).collect(),
            short_average: chart_line(&detection.short_average),
            long_average: chart_line(&detection.long_average),
            buy_signals: signals.iter().map(|p| p.signal.buy_price()).collect(),
            sell_signals: signals.iter().map(|p| p.signal.sell_price()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// The buy and sell markers in date order.
    pub fn emitted_signals(&self) -> Vec<(NaiveDate, Signal)> {
        self.dates
            .iter()
            .zip(self.buy_signals.iter().zip(&self.sell_signals))
            .filter_map(|(date, (buy, sell))| match (buy, sell) {
                (Some(price), _) => Some((*date, Signal::Buy(*price))),
                (None, Some(price)) => Some((*date, Signal::Sell(*price))),
                (None, None) => None,
            })
            .collect()
    }

    /// Highest price on the chart, used by renderers to place labels.
    pub fn max_price(&self) -> Option<Decimal> {
        self.prices.iter().copied().max()
    }
}

/// Plotting coordinates for an average. Comparisons never use these.
fn chart_line(average: &MovingAverageSeries) -> Vec<Option<f64>> {
    average.values().iter().map(|v| v.and_then(|d| d.to_f64())).collect()
}

/// Everything one analysis run hands to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: Symbol,
    pub strategy: String,
    pub short_window: u32,
    pub long_window: u32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub chart: ChartSeries,
    pub trade_book: TradeBook,
}
