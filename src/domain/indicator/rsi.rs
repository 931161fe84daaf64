//! RSI (Relative Strength Index) over the trailing window.
//!
//! Uses the last `period + 1` closes, i.e. `period` close-to-close changes.
//! Gains and losses are summed separately (losses as magnitudes) and each is
//! divided by `period`; no Wilder smoothing.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss)), rounded to 2 decimals.
//! Fewer than `period + 1` candles: neutral 50. avg_loss == 0: 100.

use crate::domain::candle::{round2, Candle};

pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn compute_rsi(candles: &[Candle], period: usize) -> f64 {
    if period == 0 || candles.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let window = &candles[candles.len() - period - 1..];
    let mut gains = 0.0;
    let mut losses = 0.0;

    for pair in window.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return 100.0;
    }

    round2(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}
