// In crates/analytics/src/types.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed round trip: a buy signal closed by a later sell signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub buy_date: NaiveDate,
    pub buy_price: Decimal,
    pub sell_date: NaiveDate,
    pub sell_price: Decimal,
    /// `(sell / buy - 1) * 100`, rounded to two decimals.
    pub gain_loss_percent: Decimal,
}

impl Trade {
    /// Calendar days the position was held.
    pub fn holding_days(&self) -> i64 {
        (self.sell_date - self.buy_date).num_days()
    }

    pub fn is_profitable(&self) -> bool {
        self.gain_loss_percent > Decimal::ZERO
    }
}

/// Which kind of signal opened the observed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// The first signal is a buy; positions open inside the window.
    BuyFirst,
    /// The first signal is a sell; it closes a position opened before the
    /// window began and has no matching buy.
    SellFirst,
}

/// The output of trade pairing for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeBook {
    /// `None` when the series has no buy or no sell signal.
    pub polarity: Option<Polarity>,
    pub trades: Vec<Trade>,
}

impl TradeBook {
    pub fn first_is_buy(&self) -> Option<bool> {
        self.polarity.map(|p| p == Polarity::BuyFirst)
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }
}
