#![allow(dead_code)]

use chrono::NaiveDate;
use marketdash::domain::candle::Candle;
use marketdash::domain::generator::is_trading_day;
use marketdash::domain::market::StockSummary;
use marketdash::domain::security::{Catalog, Sector, Security};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A Friday, so the anchor itself is a trading day.
pub fn anchor() -> NaiveDate {
    date(2024, 6, 28)
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn make_candle(date_str: &str, close: f64) -> Candle {
    Candle {
        date: NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000_000,
    }
}

/// Consecutive weekday candles starting at `start` with the given closes.
pub fn candles_from_closes(start: NaiveDate, closes: &[f64]) -> Vec<Candle> {
    let mut date = start;
    let mut out = Vec::with_capacity(closes.len());
    for &close in closes {
        while !is_trading_day(date) {
            date = date.succ_opt().unwrap();
        }
        out.push(make_candle(&date.format("%Y-%m-%d").to_string(), close));
        date = date.succ_opt().unwrap();
    }
    out
}

pub fn make_summary(symbol: &str, sector: Sector, change_pct: f64) -> StockSummary {
    StockSummary {
        symbol: symbol.to_string(),
        name: format!("{} Ltd", symbol),
        sector,
        price: 100.0,
        change: change_pct,
        change_pct,
        volume: 1_000_000,
        rsi: 50.0,
        signal: marketdash::domain::indicator::Signal::Hold,
    }
}

pub fn small_catalog() -> Catalog {
    Catalog::from_securities(vec![
        Security::new("ALPHA", "Alpha Industries", Sector::Infrastructure, 250.0),
        Security::new("BETA", "Beta Software", Sector::It, 1200.0),
        Security::new("GAMMA", "Gamma Pharma", Sector::Pharma, 80.0),
    ])
}

pub fn write_temp_file(content: &str, suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
