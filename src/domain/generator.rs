//! Synthetic daily candle generator.
//!
//! Each symbol's series is a bounded, slightly upward-biased random walk:
//! - volatility is a fixed 2.5% of the symbol's base price (absolute, not rescaled)
//! - open = previous close with up to +/-0.25% gap noise
//! - close = max(0.7 * open, open + U(-0.48, 0.52) * volatility)
//! - wicks extend up to 80% of the body beyond each end
//!
//! The calendar walk starts `floor(count * 1.4)` days before the anchor date
//! and skips weekends until `count` candles exist. All randomness comes from
//! the caller's generator so a seeded `StdRng` reproduces a series exactly.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::Rng;

use crate::domain::candle::{round2, Candle, PRICE_FLOOR};
use crate::domain::error::MarketdashError;
use crate::domain::security::Catalog;

pub const DEFAULT_SERIES_LENGTH: usize = 200;
/// Longest series accepted, roughly 3800 calendar years of trading days.
pub const MAX_SERIES_LENGTH: usize = 1_000_000;
pub const DAILY_VOLATILITY: f64 = 0.025;
pub const OPEN_GAP_NOISE: f64 = 0.005;
pub const WALK_BIAS: f64 = 0.48;
pub const WALK_FLOOR_RATIO: f64 = 0.7;
pub const WICK_RATIO: f64 = 0.8;
pub const MIN_VOLUME: u64 = 200_000;
pub const VOLUME_SPAN: f64 = 3_000_000.0;

pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// One step of the bounded walk from `price`.
pub fn random_walk<R: Rng + ?Sized>(rng: &mut R, price: f64, volatility: f64) -> f64 {
    let change = (rng.gen_range(0.0..1.0) - WALK_BIAS) * volatility;
    (price * WALK_FLOOR_RATIO).max(price + change)
}

/// Synthesize one candle on `date` following a bar that closed at `prev_close`.
pub fn synthesize_candle<R: Rng + ?Sized>(
    rng: &mut R,
    date: NaiveDate,
    prev_close: f64,
    volatility: f64,
) -> Candle {
    let open = (prev_close * (1.0 + (rng.gen_range(0.0..1.0) - 0.5) * OPEN_GAP_NOISE))
        .max(PRICE_FLOOR);
    let close = random_walk(rng, open, volatility).max(PRICE_FLOOR);
    let range = (close - open).abs();
    let high = open.max(close) + rng.gen_range(0.0..1.0) * range * WICK_RATIO;
    let low = open.min(close) - rng.gen_range(0.0..1.0) * range * WICK_RATIO;
    let volume = (rng.gen_range(0.0..1.0) * VOLUME_SPAN) as u64 + MIN_VOLUME;

    Candle {
        date,
        open: round2(open),
        high: round2(high),
        low: round2(low.max(PRICE_FLOOR)),
        close: round2(close),
        volume,
    }
}

/// Generate `count` consecutive trading-day candles for `symbol`.
///
/// Unknown symbols walk from the fallback base price. `count` must lie in
/// `1..=MAX_SERIES_LENGTH`, and the walk must stay inside chrono's date range.
pub fn generate_series<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    symbol: &str,
    count: usize,
    anchor: NaiveDate,
) -> Result<Vec<Candle>, MarketdashError> {
    if count == 0 {
        return Err(invalid_count(count, "at least one candle is required".to_string()));
    }
    if count > MAX_SERIES_LENGTH {
        return Err(invalid_count(
            count,
            format!("at most {} candles are supported", MAX_SERIES_LENGTH),
        ));
    }

    let base_price = catalog.lookup(symbol).base_price;
    let volatility = base_price * DAILY_VOLATILITY;
    // calendar overshoot of 1.4x so weekends still leave `count` trading days
    let lookback = count as u64 * 14 / 10;

    let mut date = anchor
        .checked_sub_days(Days::new(lookback))
        .ok_or_else(|| {
            invalid_count(
                count,
                format!("series would start before {}", NaiveDate::MIN),
            )
        })?;
    let mut current_price = base_price;
    let mut candles = Vec::with_capacity(count);

    while candles.len() < count {
        if is_trading_day(date) {
            let candle = synthesize_candle(rng, date, current_price, volatility);
            current_price = candle.close;
            candles.push(candle);
        }
        date = date.succ_opt().ok_or_else(|| {
            invalid_count(count, format!("series would run past {}", NaiveDate::MAX))
        })?;
    }

    tracing::debug!(
        symbol,
        count,
        first = %candles[0].date,
        last = %candles[count - 1].date,
        "generated candle series"
    );

    Ok(candles)
}

fn invalid_count(count: usize, reason: String) -> MarketdashError {
    MarketdashError::InvalidCount { count, reason }
}
