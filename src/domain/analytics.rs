//! Summary statistics over a candle series, as shown beside the chart.

use crate::domain::candle::Candle;

/// Trading days in the short "week" range.
pub const WEEK_LENGTH: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub last: Candle,
    pub first: Candle,
    pub week_high: f64,
    pub week_low: f64,
    pub range_high: f64,
    pub range_low: f64,
    /// Percent move from the first open to the last close.
    pub total_return_pct: f64,
    pub avg_volume: f64,
    pub candle_count: usize,
}

impl SeriesStats {
    /// Returns `None` for an empty series.
    pub fn compute(candles: &[Candle]) -> Option<Self> {
        let first = candles.first()?.clone();
        let last = candles.last()?.clone();

        let week = &candles[candles.len().saturating_sub(WEEK_LENGTH)..];
        let (week_high, week_low) = high_low(week);
        let (range_high, range_low) = high_low(candles);

        let total_return_pct = (last.close - first.open) / first.open * 100.0;
        let avg_volume =
            candles.iter().map(|c| c.volume as f64).sum::<f64>() / candles.len() as f64;

        Some(Self {
            last,
            first,
            week_high,
            week_low,
            range_high,
            range_low,
            total_return_pct,
            avg_volume,
            candle_count: candles.len(),
        })
    }
}

fn high_low(candles: &[Candle]) -> (f64, f64) {
    candles.iter().fold((f64::MIN, f64::MAX), |(hi, lo), c| {
        (hi.max(c.high), lo.min(c.low))
    })
}
