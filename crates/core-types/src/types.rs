// In crates/core-types/src/types.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A ticker symbol, e.g. "AAPL".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single daily observation: the adjusted close price on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// A validated, date-ordered price history for one security.
///
/// The only way to build one is [`PriceSeries::new`], which guarantees that
/// dates are strictly increasing and every price is positive. Everything
/// downstream relies on those two facts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Validates and wraps a sequence of price points.
    ///
    /// An empty sequence is valid; it simply produces no signals later on.
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for (index, point) in points.iter().enumerate() {
            if point.price <= Decimal::ZERO {
                return Err(Error::NonPositivePrice {
                    index,
                    date: point.date,
                    price: point.price,
                });
            }
            if index > 0 {
                let previous = points[index - 1].date;
                if point.date <= previous {
                    return Err(Error::NonIncreasingDate {
                        index,
                        previous,
                        current: point.date,
                    });
                }
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// The prices alone, in date order.
    pub fn prices(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.price).collect()
    }
}

/// The decision emitted at one index of the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    /// The short average has just moved above the long one.
    Buy(Decimal),
    /// The short average has just moved below the long one.
    Sell(Decimal),
    /// No transition at this index.
    #[default]
    Hold,
}

impl Signal {
    pub fn is_hold(&self) -> bool {
        matches!(self, Signal::Hold)
    }

    pub fn buy_price(&self) -> Option<Decimal> {
        match self {
            Signal::Buy(price) => Some(*price),
            _ => None,
        }
    }

    pub fn sell_price(&self) -> Option<Decimal> {
        match self {
            Signal::Sell(price) => Some(*price),
            _ => None,
        }
    }
}

/// A signal together with the date it was emitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub signal: Signal,
}

/// One signal per price point, index-aligned with the source [`PriceSeries`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SignalSeries {
    points: Vec<SignalPoint>,
}

impl SignalSeries {
    pub fn new(points: Vec<SignalPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SignalPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The non-`Hold` signals, in emission order.
    pub fn emitted(&self) -> impl Iterator<Item = &SignalPoint> + '_ {
        self.points.iter().filter(|p| !p.signal.is_hold())
    }
}
