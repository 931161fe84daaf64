//! Derived indicator panel.
//!
//! These readings are cheap proxies computed from a summary's RSI, price and
//! daily change rather than from the candle series. Stoch RSI, MFI and ATR
//! mix in random noise, drawn from the caller's generator.

use rand::Rng;

use crate::domain::candle::{round_dp, round2};
use crate::domain::indicator::{Signal, SignalBand};

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorReading {
    pub name: &'static str,
    pub description: &'static str,
    pub value: f64,
    /// `None` for readings that never produce a directional signal.
    pub band: Option<SignalBand>,
}

impl IndicatorReading {
    pub fn signal(&self) -> Signal {
        self.band.map_or(Signal::Hold, |band| band.classify(self.value))
    }
}

/// Build the panel for one security, in display order.
pub fn indicator_panel<R: Rng + ?Sized>(
    rng: &mut R,
    rsi: f64,
    price: f64,
    change_pct: f64,
) -> Vec<IndicatorReading> {
    let macd = round2(change_pct * 2.3);
    let stoch_rsi = round_dp((rsi / 100.0) * 0.8 + rng.gen_range(0.0..1.0) * 0.2, 3);
    let cci = round_dp((rsi - 50.0) * 3.2, 1);
    let williams_r = round_dp(-(100.0 - rsi) * 0.95, 1);
    let mfi = round_dp(rsi * 0.9 + rng.gen_range(0.0..1.0) * 10.0, 1);
    let atr = round2(price * 0.015 + rng.gen_range(0.0..1.0) * price * 0.005);

    vec![
        IndicatorReading {
            name: "RSI (14)",
            description: "Relative Strength Index",
            value: rsi,
            band: Some(SignalBand::RSI),
        },
        IndicatorReading {
            name: "MACD",
            description: "Moving Avg Convergence",
            value: macd,
            band: Some(SignalBand::new(-2.0, 2.0)),
        },
        IndicatorReading {
            name: "Stoch RSI",
            description: "Stochastic RSI",
            value: stoch_rsi,
            band: Some(SignalBand::new(0.2, 0.8)),
        },
        IndicatorReading {
            name: "CCI (20)",
            description: "Commodity Channel Index",
            value: cci,
            band: Some(SignalBand::new(-100.0, 100.0)),
        },
        IndicatorReading {
            name: "Williams %R",
            description: "Williams Percent Range",
            value: williams_r,
            band: Some(SignalBand::new(-80.0, -20.0)),
        },
        IndicatorReading {
            name: "MFI (14)",
            description: "Money Flow Index",
            value: mfi,
            band: Some(SignalBand::new(25.0, 75.0)),
        },
        IndicatorReading {
            name: "ATR (14)",
            description: "Average True Range",
            value: atr,
            band: None,
        },
    ]
}
