//! Market-wide aggregates: per-symbol summaries and the sector heatmap.
//!
//! Every call regenerates its data from scratch. Summaries for different
//! symbols are independent walks and are not tied to any longer chart series.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rand::Rng;

use crate::domain::candle::round2;
use crate::domain::error::MarketdashError;
use crate::domain::generator::generate_series;
use crate::domain::indicator::{classify_signal, compute_rsi, Signal, DEFAULT_RSI_PERIOD};
use crate::domain::security::{Catalog, Sector, Security};

pub const SUMMARY_SERIES_LENGTH: usize = 30;
pub const HEATMAP_MIN: f64 = -1.8;
pub const HEATMAP_MAX: f64 = 2.2;

#[derive(Debug, Clone, PartialEq)]
pub struct StockSummary {
    pub symbol: String,
    pub name: String,
    pub sector: Sector,
    /// Latest close.
    pub price: f64,
    /// Latest close minus previous close.
    pub change: f64,
    pub change_pct: f64,
    pub volume: u64,
    pub rsi: f64,
    pub signal: Signal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    pub series_length: usize,
    pub rsi_period: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            series_length: SUMMARY_SERIES_LENGTH,
            rsi_period: DEFAULT_RSI_PERIOD,
        }
    }
}

/// Summarize one security from a fresh short series.
pub fn summarize_security<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    security: &Security,
    anchor: NaiveDate,
    options: &SummaryOptions,
) -> Result<StockSummary, MarketdashError> {
    if options.series_length < 2 {
        return Err(MarketdashError::InvalidCount {
            count: options.series_length,
            reason: "summaries need at least two candles".to_string(),
        });
    }

    let candles = generate_series(rng, catalog, &security.symbol, options.series_length, anchor)?;
    let last = &candles[candles.len() - 1];
    let prev = &candles[candles.len() - 2];

    let change = round2(last.close - prev.close);
    let change_pct = round2(change / prev.close * 100.0);
    let rsi = compute_rsi(&candles, options.rsi_period);

    Ok(StockSummary {
        symbol: security.symbol.clone(),
        name: security.name.clone(),
        sector: security.sector,
        price: last.close,
        change,
        change_pct,
        volume: last.volume,
        rsi,
        signal: classify_signal(rsi),
    })
}

/// One summary per catalog entry, in catalog order.
pub fn summarize_all<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    anchor: NaiveDate,
    options: &SummaryOptions,
) -> Result<Vec<StockSummary>, MarketdashError> {
    let summaries = catalog
        .securities()
        .iter()
        .map(|security| summarize_security(rng, catalog, security, anchor, options))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        securities = summaries.len(),
        buy = summaries.iter().filter(|s| s.signal == Signal::Buy).count(),
        sell = summaries.iter().filter(|s| s.signal == Signal::Sell).count(),
        "refreshed stock summaries"
    );

    Ok(summaries)
}

/// Case-insensitive substring match on symbol, name or sector. Order is kept.
pub fn filter_summaries<'a>(summaries: &'a [StockSummary], query: &str) -> Vec<&'a StockSummary> {
    let needle = query.trim().to_lowercase();
    summaries
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.symbol.to_lowercase().contains(&needle)
                || s.name.to_lowercase().contains(&needle)
                || s.sector.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Column a summary table can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySort {
    Symbol,
    Price,
    ChangePct,
    Volume,
    Rsi,
}

impl SummarySort {
    fn compare(self, a: &StockSummary, b: &StockSummary) -> Ordering {
        match self {
            SummarySort::Symbol => a.symbol.cmp(&b.symbol),
            SummarySort::Price => a.price.total_cmp(&b.price),
            SummarySort::ChangePct => a.change_pct.total_cmp(&b.change_pct),
            SummarySort::Volume => a.volume.cmp(&b.volume),
            SummarySort::Rsi => a.rsi.total_cmp(&b.rsi),
        }
    }
}

impl fmt::Display for SummarySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SummarySort::Symbol => "symbol",
            SummarySort::Price => "price",
            SummarySort::ChangePct => "change_pct",
            SummarySort::Volume => "volume",
            SummarySort::Rsi => "rsi",
        };
        f.write_str(name)
    }
}

impl FromStr for SummarySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "symbol" => Ok(SummarySort::Symbol),
            "price" => Ok(SummarySort::Price),
            "change_pct" | "change-pct" | "change" => Ok(SummarySort::ChangePct),
            "volume" => Ok(SummarySort::Volume),
            "rsi" => Ok(SummarySort::Rsi),
            other => Err(format!(
                "unknown sort key '{}' (expected symbol, price, change_pct, volume or rsi)",
                other
            )),
        }
    }
}

/// Stable sort by `key`. Equal keys keep their incoming (catalog) order in
/// both directions.
pub fn sort_summaries(summaries: &mut [&StockSummary], key: SummarySort, descending: bool) {
    summaries.sort_by(|a, b| {
        let ord = key.compare(a, b);
        if descending { ord.reverse() } else { ord }
    });
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorHeatmapEntry {
    pub sector: Sector,
    /// Percentage, roughly within [`HEATMAP_MIN`, `HEATMAP_MAX`].
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeatmapMode {
    /// Independent noise per sector.
    #[default]
    Random,
    /// Mean `change_pct` of each sector's summaries.
    SectorChange,
}

impl fmt::Display for HeatmapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeatmapMode::Random => write!(f, "random"),
            HeatmapMode::SectorChange => write!(f, "sector_change"),
        }
    }
}

impl FromStr for HeatmapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "random" => Ok(HeatmapMode::Random),
            "sector_change" | "sector-change" => Ok(HeatmapMode::SectorChange),
            other => Err(format!(
                "unknown heatmap mode '{}' (expected random or sector_change)",
                other
            )),
        }
    }
}

/// One randomized entry per sector: `U(0,1) * 4 - 1.8`, rounded to 2 decimals.
pub fn sector_heatmap<R: Rng + ?Sized>(rng: &mut R) -> Vec<SectorHeatmapEntry> {
    Sector::ALL
        .iter()
        .map(|&sector| SectorHeatmapEntry {
            sector,
            value: round2((rng.gen_range(0.0..1.0) - 0.45) * 4.0),
        })
        .collect()
}

/// Mean `change_pct` per sector, clamped to the heatmap range. Sectors with no
/// summaries report 0.
pub fn sector_heatmap_from_summaries(summaries: &[StockSummary]) -> Vec<SectorHeatmapEntry> {
    Sector::ALL
        .iter()
        .map(|&sector| {
            let (sum, n) = summaries
                .iter()
                .filter(|s| s.sector == sector)
                .fold((0.0, 0usize), |(sum, n), s| (sum + s.change_pct, n + 1));
            let value = if n == 0 {
                0.0
            } else {
                round2((sum / n as f64).clamp(HEATMAP_MIN, HEATMAP_MAX))
            };
            SectorHeatmapEntry { sector, value }
        })
        .collect()
}

pub fn build_heatmap<R: Rng + ?Sized>(
    rng: &mut R,
    mode: HeatmapMode,
    summaries: &[StockSummary],
) -> Vec<SectorHeatmapEntry> {
    match mode {
        HeatmapMode::Random => sector_heatmap(rng),
        HeatmapMode::SectorChange => sector_heatmap_from_summaries(summaries),
    }
}

/// Entries ordered by value, largest first. Ties keep sector order.
pub fn ranked_heatmap(entries: &[SectorHeatmapEntry]) -> Vec<SectorHeatmapEntry> {
    let mut ranked = entries.to_vec();
    ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
    ranked
}
