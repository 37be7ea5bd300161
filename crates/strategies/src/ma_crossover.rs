// In crates/strategies/src/ma_crossover.rs

use core_types::{PriceSeries, Signal, SignalPoint, SignalSeries};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::moving_average::{MovingAverageSeries, simple_moving_average};
use crate::types::{Detection, MACrossoverSettings};
use crate::Strategy;

/// The direction of the last crossover seen by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendState {
    /// No comparable pair of averages has been seen yet.
    #[default]
    Undetermined,
    /// Short average last seen above the long one.
    Above,
    /// Short average last seen below the long one.
    Below,
}

impl TrendState {
    /// Advances the state machine by one index and returns the signal to emit there.
    ///
    /// Undefined averages and exact ties leave the state untouched, so a tie
    /// never re-arms a crossover that has already fired.
    pub fn step(self, short: Option<Decimal>, long: Option<Decimal>, price: Decimal) -> (TrendState, Signal) {
        match (short, long) {
            (Some(s), Some(l)) if s > l => match self {
                TrendState::Above => (self, Signal::Hold),
                _ => (TrendState::Above, Signal::Buy(price)),
            },
            (Some(s), Some(l)) if s < l => match self {
                TrendState::Below => (self, Signal::Hold),
                _ => (TrendState::Below, Signal::Sell(price)),
            },
            _ => (self, Signal::Hold),
        }
    }
}

/// Walks the aligned averages once and emits exactly one signal per price point.
pub fn detect_signals(
    series: &PriceSeries,
    short: &MovingAverageSeries,
    long: &MovingAverageSeries,
) -> SignalSeries {
    let (_, points) = series.points().iter().enumerate().fold(
        (TrendState::default(), Vec::with_capacity(series.len())),
        |(state, mut points), (i, point)| {
            let (next, signal) = state.step(short.get(i), long.get(i), point.price);
            points.push(SignalPoint { date: point.date, signal });
            (next, points)
        },
    );
    SignalSeries::new(points)
}

/// Dual simple-moving-average crossover.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The configuration for this strategy instance.
    settings: MACrossoverSettings,
}

impl MACrossover {
    /// Creates a new `MACrossover` strategy instance from its settings.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        if settings.short_period < 1 {
            return Err(Error::InvalidWindow(settings.short_period as usize));
        }
        if settings.short_period >= settings.long_period {
            return Err(Error::InvalidSettings(format!(
                "short_period ({}) must be less than long_period ({})",
                settings.short_period, settings.long_period
            )));
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "DualMovingAverageCrossover"
    }

    fn detect(&self, series: &PriceSeries) -> Result<Detection> {
        let prices = series.prices();
        let short_period = self.settings.short_period as usize;
        let long_period = self.settings.long_period as usize;

        // The two windows share nothing, so compute them side by side.
        let (short_average, long_average) = rayon::join(
            || simple_moving_average(&prices, short_period),
            || simple_moving_average(&prices, long_period),
        );
        let short_average = short_average?;
        let long_average = long_average?;

        let signals = detect_signals(series, &short_average, &long_average);

        let buys = signals.emitted().filter(|p| matches!(p.signal, Signal::Buy(_))).count();
        let sells = signals.emitted().count() - buys;
        tracing::debug!(
            strategy = self.name(),
            points = series.len(),
            buys,
            sells,
            "Crossover scan complete."
        );

        Ok(Detection { short_average, long_average, signals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::PricePoint;
    use rust_decimal_macros::dec;

    fn series_from(prices: &[Decimal]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, price)| PricePoint::new(start + chrono::Days::new(i as u64), *price))
            .collect();
        PriceSeries::new(points).unwrap()
    }

    fn crossover(short: u32, long: u32) -> MACrossover {
        MACrossover::new(MACrossoverSettings { short_period: short, long_period: long }).unwrap()
    }

    fn emitted(signals: &SignalSeries) -> Vec<(usize, Signal)> {
        signals
            .points()
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.signal.is_hold())
            .map(|(i, p)| (i, p.signal))
            .collect()
    }

    #[test]
    fn step_emits_only_on_transitions() {
        let p = dec!(7);
        let (state, signal) = TrendState::Undetermined.step(Some(dec!(2)), Some(dec!(1)), p);
        assert_eq!((state, signal), (TrendState::Above, Signal::Buy(p)));

        let (state, signal) = state.step(Some(dec!(3)), Some(dec!(1)), p);
        assert_eq!((state, signal), (TrendState::Above, Signal::Hold));

        let (state, signal) = state.step(Some(dec!(0.5)), Some(dec!(1)), p);
        assert_eq!((state, signal), (TrendState::Below, Signal::Sell(p)));

        let (state, signal) = state.step(Some(dec!(0.4)), Some(dec!(1)), p);
        assert_eq!((state, signal), (TrendState::Below, Signal::Hold));
    }

    #[test]
    fn first_comparison_below_emits_sell() {
        let (state, signal) = TrendState::Undetermined.step(Some(dec!(1)), Some(dec!(2)), dec!(3));
        assert_eq!((state, signal), (TrendState::Below, Signal::Sell(dec!(3))));
    }

    #[test]
    fn undefined_and_ties_leave_state_alone() {
        for state in [TrendState::Undetermined, TrendState::Above, TrendState::Below] {
            assert_eq!(state.step(None, Some(dec!(1)), dec!(1)), (state, Signal::Hold));
            assert_eq!(state.step(Some(dec!(1)), None, dec!(1)), (state, Signal::Hold));
            assert_eq!(state.step(Some(dec!(1)), Some(dec!(1.00)), dec!(1)), (state, Signal::Hold));
        }
    }

    #[test]
    fn tie_does_not_rearm_crossover() {
        let series = series_from(&[dec!(1), dec!(2), dec!(3), dec!(4)]);
        let short = MovingAverageSeries::from_values(1, vec![Some(dec!(2)), Some(dec!(1)), Some(dec!(2)), Some(dec!(0.5))]);
        let long = MovingAverageSeries::from_values(2, vec![Some(dec!(1)); 4]);

        let signals = detect_signals(&series, &short, &long);
        assert_eq!(
            emitted(&signals),
            vec![(0, Signal::Buy(dec!(1))), (3, Signal::Sell(dec!(4)))]
        );
    }

    #[test]
    fn one_signal_per_price_point() {
        let prices: Vec<Decimal> = (1..=50).map(|i| Decimal::from((i * 7) % 13 + 1)).collect();
        let detection = crossover(3, 8).detect(&series_from(&prices)).unwrap();
        assert_eq!(detection.signals.len(), prices.len());
        assert_eq!(detection.short_average.len(), prices.len());
        assert_eq!(detection.long_average.len(), prices.len());
    }

    #[test]
    fn emitted_signals_alternate() {
        let prices: Vec<Decimal> = (0..300).map(|i| Decimal::from((i * 37) % 101 + 1)).collect();
        let detection = crossover(5, 20).detect(&series_from(&prices)).unwrap();
        let kinds: Vec<bool> = detection
            .signals
            .emitted()
            .map(|p| matches!(p.signal, Signal::Buy(_)))
            .collect();
        assert!(kinds.len() > 2);
        assert!(kinds.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn flat_series_never_signals() {
        for price in [dec!(0.1), dec!(1.1), dec!(3.3), dec!(27.33), dec!(42.17), dec!(99.99), dec!(123.45), dec!(175.08)] {
            let prices = vec![price; 1000];
            let detection = crossover(30, 100).detect(&series_from(&prices)).unwrap();
            assert_eq!(detection.signals.emitted().count(), 0, "price {price}");
            assert_eq!(detection.short_average.get(999), detection.long_average.get(999));
        }
    }

    #[test]
    fn short_series_is_all_hold() {
        let prices = vec![dec!(10); 99];
        let detection = crossover(30, 100).detect(&series_from(&prices)).unwrap();
        assert_eq!(detection.signals.len(), 99);
        assert_eq!(detection.signals.emitted().count(), 0);

        let detection = crossover(30, 100).detect(&series_from(&[])).unwrap();
        assert!(detection.signals.is_empty());
    }

    #[test]
    fn step_up_then_step_down() {
        let mut prices = vec![dec!(10); 29];
        prices.extend(vec![dec!(20); 100]);
        prices.extend(vec![dec!(5); 100]);

        let detection = crossover(30, 100).detect(&series_from(&prices)).unwrap();
        assert_eq!(
            emitted(&detection.signals),
            vec![(99, Signal::Buy(dec!(20))), (129, Signal::Sell(dec!(5)))]
        );
    }

    #[test]
    fn settings_are_validated() {
        let err = MACrossover::new(MACrossoverSettings { short_period: 100, long_period: 30 }).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = MACrossover::new(MACrossoverSettings { short_period: 30, long_period: 30 }).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings(_)));

        let err = MACrossover::new(MACrossoverSettings { short_period: 0, long_period: 30 }).unwrap_err();
        assert_eq!(err, Error::InvalidWindow(0));
    }

    #[test]
    fn default_settings_are_thirty_and_hundred() {
        let strategy = MACrossover::new(MACrossoverSettings::default()).unwrap();
        assert_eq!(strategy.settings().short_period, 30);
        assert_eq!(strategy.settings().long_period, 100);
    }

    #[test]
    fn settings_fill_missing_fields_from_defaults() {
        let settings: MACrossoverSettings = serde_json::from_str(r#"{ "short_period": 20 }"#).unwrap();
        assert_eq!(settings, MACrossoverSettings { short_period: 20, long_period: 100 });
    }
}
