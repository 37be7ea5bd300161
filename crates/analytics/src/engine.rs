use crate::types::{Polarity, Trade, TradeBook};
use chrono::NaiveDate;
use core_types::{Signal, SignalSeries};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Percentage return from `buy` to `sell`, rounded to two decimals with
/// midpoints rounded away from zero. `None` if `buy` is zero.
pub fn gain_loss_percent(buy: Decimal, sell: Decimal) -> Option<Decimal> {
    let ratio = sell.checked_div(buy)?;
    Some(((ratio - dec!(1)) * dec!(100)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// One side of a trade as found in the signal series.
#[derive(Debug, Clone, Copy)]
struct Leg {
    index: usize,
    date: NaiveDate,
    price: Decimal,
}

/// Pairs buy and sell signals into trades and prices each one.
#[derive(Default)]
pub struct TradePairer;

impl TradePairer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the trade book for a signal series.
    ///
    /// If the first sell comes before the first buy, that sell closes a
    /// position opened before the series began, so every buy is matched with
    /// the sell one step further along. Trailing signals without a partner
    /// (a position still open at the end) are dropped.
    pub fn pair(&self, signals: &SignalSeries) -> TradeBook {
        let mut buys = Vec::new();
        let mut sells = Vec::new();
        for (index, point) in signals.points().iter().enumerate() {
            match point.signal {
                Signal::Buy(price) => buys.push(Leg { index, date: point.date, price }),
                Signal::Sell(price) => sells.push(Leg { index, date: point.date, price }),
                Signal::Hold => {}
            }
        }

        let (Some(first_buy), Some(first_sell)) = (buys.first(), sells.first()) else {
            tracing::debug!(buys = buys.len(), sells = sells.len(), "No buy/sell pair to trade.");
            return TradeBook::default();
        };

        let polarity = if first_buy.index < first_sell.index {
            Polarity::BuyFirst
        } else {
            Polarity::SellFirst
        };

        let matched = buys.len().min(sells.len());
        let (count, offset) = match polarity {
            Polarity::BuyFirst => (matched, 0),
            Polarity::SellFirst => (matched.saturating_sub(1), 1),
        };

        let trades: Vec<Trade> = (0..count)
            .filter_map(|i| {
                let buy = buys[i];
                let sell = sells[i + offset];
                let Some(gain_loss_percent) = gain_loss_percent(buy.price, sell.price) else {
                    tracing::warn!(date = %buy.date, "Skipping trade with a zero buy price.");
                    return None;
                };
                Some(Trade {
                    buy_date: buy.date,
                    buy_price: buy.price,
                    sell_date: sell.date,
                    sell_price: sell.price,
                    gain_loss_percent,
                })
            })
            .collect();

        tracing::debug!(
            ?polarity,
            buys = buys.len(),
            sells = sells.len(),
            trades = trades.len(),
            "Paired signals into trades."
        );

        TradeBook { polarity: Some(polarity), trades }
    }
}
