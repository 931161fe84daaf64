//! Daily OHLC candle.

use chrono::NaiveDate;

/// Lowest price any generated candle may report.
pub const PRICE_FLOOR: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// Date in `YYYY-MM-DD` form.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn body_high(&self) -> f64 {
        self.open.max(self.close)
    }

    pub fn body_low(&self) -> f64 {
        self.open.min(self.close)
    }

    /// `low <= min(open, close)`, `high >= max(open, close)`, `low >= 1`.
    pub fn is_consistent(&self) -> bool {
        self.low <= self.body_low()
            && self.high >= self.body_high()
            && self.high >= self.low
            && self.low >= PRICE_FLOOR
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_dp(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

pub fn round2(value: f64) -> f64 {
    round_dp(value, 2)
}
