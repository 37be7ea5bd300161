pub mod types;

use analytics::TradePairer;
use core_types::{PriceSeries, Symbol};
use strategies::{MACrossover, MACrossoverSettings, Strategy};
use tracing::info;

pub use types::{AnalysisReport, ChartSeries};

/// Runs one price series through moving averages, crossover detection and
/// trade pairing.
///
/// Each stage only reads the previous stage's output, and nothing is kept
/// between runs.
pub struct Analyzer {
    /// The crossover strategy that produces signals.
    strategy: MACrossover,
    /// Turns signals into priced trades.
    pairer: TradePairer,
}

impl Analyzer {
    pub fn new(settings: MACrossoverSettings) -> anyhow::Result<Self> {
        Ok(Self {
            strategy: MACrossover::new(settings)?,
            pairer: TradePairer::new(),
        })
    }

    pub fn run(&self, symbol: &Symbol, series: &PriceSeries) -> anyhow::Result<AnalysisReport> {
        let settings = *self.strategy.settings();

        if series.len() < settings.long_period as usize {
            info!(
                symbol = %symbol,
                points = series.len(),
                long_window = settings.long_period,
                "Fewer points than the long window; no signals will be produced."
            );
        }

        let detection = self.strategy.detect(series)?;
        let trade_book = self.pairer.pair(&detection.signals);

        info!(
            symbol = %symbol,
            points = series.len(),
            signals = detection.signals.emitted().count(),
            trades = trade_book.len(),
            "Analysis complete."
        );

        Ok(AnalysisReport {
            symbol: symbol.clone(),
            strategy: self.strategy.name().to_string(),
            short_window: settings.short_period,
            long_window: settings.long_period,
            start_date: series.first_date(),
            end_date: series.last_date(),
            chart: ChartSeries::new(series, &detection),
            trade_book,
        })
    }
}
