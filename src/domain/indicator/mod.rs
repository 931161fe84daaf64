//! Technical indicators derived from a candle series.
//!
//! - [`sma::moving_average`]: trailing mean of closes, aligned 1:1 with the series
//! - [`rsi::compute_rsi`]: single RSI reading over the trailing window
//! - [`Signal`]: discrete BUY / SELL / HOLD recommendation from a threshold band
//! - [`panel`]: the dashboard's derived indicator readings

pub mod panel;
pub mod rsi;
pub mod sma;

pub use rsi::{compute_rsi, DEFAULT_RSI_PERIOD};
pub use sma::moving_average;

use std::fmt;

/// RSI below this is oversold.
pub const RSI_OVERSOLD: f64 = 35.0;
/// RSI above this is overbought.
pub const RSI_OVERBOUGHT: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open interval `(low, high)`: strictly below `low` is BUY, strictly above
/// `high` is SELL, anything on or between the bounds is HOLD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBand {
    pub low: f64,
    pub high: f64,
}

impl SignalBand {
    pub const RSI: SignalBand = SignalBand {
        low: RSI_OVERSOLD,
        high: RSI_OVERBOUGHT,
    };

    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn classify(&self, value: f64) -> Signal {
        if value < self.low {
            Signal::Buy
        } else if value > self.high {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

/// The signal policy: RSI < 35 is BUY, RSI > 65 is SELL, otherwise HOLD.
pub fn classify_signal(rsi: f64) -> Signal {
    SignalBand::RSI.classify(rsi)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    pub fn of(rsi: f64) -> Self {
        match classify_signal(rsi) {
            Signal::Buy => RsiZone::Oversold,
            Signal::Sell => RsiZone::Overbought,
            Signal::Hold => RsiZone::Neutral,
        }
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiZone::Oversold => write!(f, "Oversold"),
            RsiZone::Neutral => write!(f, "Neutral"),
            RsiZone::Overbought => write!(f, "Overbought"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
        }
    }
}
