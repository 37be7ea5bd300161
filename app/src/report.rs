// In app/src/report.rs

use std::fmt::{self, Write};

use analytics::{Polarity, Trade};
use chrono::NaiveDate;
use core_types::Signal;
use pipeline::AnalysisReport;
use rust_decimal::Decimal;

/// The x-axis caption, e.g. "Jan 02, 2015 - Oct 16, 2026".
pub fn window_label(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", start.format("%b %d, %Y"), end.format("%b %d, %Y"))
}

fn signed_percent(value: Decimal) -> String {
    if value > Decimal::ZERO {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

fn trade_line(trade: &Trade) -> String {
    format!(
        "  {} @ {:.2} -> {} @ {:.2}  {:>9}  ({} days)  {}",
        trade.buy_date,
        trade.buy_price,
        trade.sell_date,
        trade.sell_price,
        signed_percent(trade.gain_loss_percent),
        trade.holding_days(),
        if trade.is_profitable() { "gain" } else { "loss" },
    )
}

/// Renders the text report. Everything shown comes from the finished
/// analysis; nothing is recomputed here.
pub fn render(report: &AnalysisReport) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{} Adj. Close Price History with Buy & Sell Signals", report.symbol)?;
    if let (Some(start), Some(end)) = (report.start_date, report.end_date) {
        writeln!(out, "{}", window_label(start, end))?;
    }
    writeln!(
        out,
        "{} (SMA{} / SMA{}), {} price points",
        report.strategy,
        report.short_window,
        report.long_window,
        report.chart.len()
    )?;

    let signals = report.chart.emitted_signals();
    writeln!(out, "\nSignals ({}):", signals.len())?;
    if signals.is_empty() {
        writeln!(out, "  none")?;
    }
    for (date, signal) in &signals {
        match signal {
            Signal::Buy(price) => writeln!(out, "  {date}  BUY   {price:.2}")?,
            Signal::Sell(price) => writeln!(out, "  {date}  SELL  {price:.2}")?,
            Signal::Hold => {}
        }
    }

    let book = &report.trade_book;
    let opened_by = match book.polarity {
        Some(Polarity::BuyFirst) => "first signal is a buy",
        Some(Polarity::SellFirst) => "first signal is a sell, leading sell skipped",
        None => "no buy/sell pair",
    };
    writeln!(out, "\nTrades ({}; {}):", book.len(), opened_by)?;
    if book.is_empty() {
        writeln!(out, "  none")?;
    }
    for trade in &book.trades {
        writeln!(out, "{}", trade_line(trade))?;
    }

    Ok(out)
}

pub fn print_report(report: &AnalysisReport) -> Result<(), fmt::Error> {
    print!("{}", render(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use core_types::{PricePoint, PriceSeries, Symbol};
    use pipeline::Analyzer;
    use rust_decimal_macros::dec;
    use strategies::MACrossoverSettings;

    fn sample_report() -> AnalysisReport {
        let start = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
        let prices = [10, 9, 8, 7, 6, 5, 5, 5, 20, 20, 20, 20, 20, 2, 2, 2, 2, 2, 2, 30, 30, 30, 30, 30, 30];
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, p)| PricePoint::new(start + Days::new(i as u64), Decimal::from(*p)))
            .collect();
        let series = PriceSeries::new(points).unwrap();
        Analyzer::new(MACrossoverSettings { short_period: 3, long_period: 6 })
            .unwrap()
            .run(&Symbol("AAPL".into()), &series)
            .unwrap()
    }

    #[test]
    fn window_label_matches_axis_format() {
        let start = NaiveDate::from_ymd_opt(2015, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(window_label(start, end), "Jan 02, 2015 - Oct 16, 2026");
    }

    #[test]
    fn signed_percent_formats() {
        assert_eq!(signed_percent(dec!(12.5)), "+12.50%");
        assert_eq!(signed_percent(dec!(-75)), "-75.00%");
        assert_eq!(signed_percent(dec!(0)), "0.00%");
    }

    #[test]
    fn render_lists_signals_and_trades() {
        let text = render(&sample_report()).unwrap();
        assert!(text.starts_with("AAPL Adj. Close Price History with Buy & Sell Signals\n"));
        assert!(text.contains("Jan 02, 2015 - Jan 26, 2015"));
        assert!(text.contains("SMA3 / SMA6"));
        assert!(text.contains("Signals (4):"));
        assert!(text.contains("2015-01-07  SELL  5.00"));
        assert!(text.contains("2015-01-10  BUY   20.00"));
        assert!(text.contains("Trades (1; first signal is a sell, leading sell skipped):"));
        assert!(text.contains("2015-01-10 @ 20.00 -> 2015-01-15 @ 2.00"));
        assert!(text.contains("-90.00%"));
        assert!(text.contains("loss"));
    }

    #[test]
    fn render_handles_empty_analysis() {
        let series = PriceSeries::new(vec![]).unwrap();
        let report = Analyzer::new(MACrossoverSettings::default())
            .unwrap()
            .run(&Symbol("MSFT".into()), &series)
            .unwrap();
        let text = render(&report).unwrap();
        assert!(text.contains("Signals (0):\n  none"));
        assert!(text.contains("Trades (0; no buy/sell pair):\n  none"));
    }
}
