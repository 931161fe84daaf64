//! Runtime settings, read from a [`ConfigPort`] and validated up front.
//!
//! Every key is optional. Missing keys take the defaults below; present but
//! out-of-range values are rejected with `ConfigInvalid`.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::error::MarketdashError;
use crate::domain::generator::{DEFAULT_SERIES_LENGTH, MAX_SERIES_LENGTH};
use crate::domain::indicator::DEFAULT_RSI_PERIOD;
use crate::domain::market::{HeatmapMode, SummaryOptions, SUMMARY_SERIES_LENGTH};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_MA_PERIODS: [usize; 2] = [20, 50];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
    pub chart_length: usize,
    pub summary_length: usize,
    /// `None` anchors series on today's date.
    pub anchor_date: Option<NaiveDate>,
    pub rsi_period: usize,
    pub ma_periods: Vec<usize>,
    pub heatmap_mode: HeatmapMode,
    pub catalog_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            chart_length: DEFAULT_SERIES_LENGTH,
            summary_length: SUMMARY_SERIES_LENGTH,
            anchor_date: None,
            rsi_period: DEFAULT_RSI_PERIOD,
            ma_periods: DEFAULT_MA_PERIODS.to_vec(),
            heatmap_mode: HeatmapMode::default(),
            catalog_path: None,
        }
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, MarketdashError> {
        let defaults = Settings::default();

        let seed = match config.get_string("generator", "seed") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                invalid("generator", "seed", "seed must be a non-negative integer")
            })?),
            None => None,
        };

        let chart_length = read_length(
            config,
            "generator",
            "chart_length",
            defaults.chart_length,
            1..=MAX_SERIES_LENGTH,
        )?;
        let summary_length = read_length(
            config,
            "generator",
            "summary_length",
            defaults.summary_length,
            2..=MAX_SERIES_LENGTH,
        )?;
        let rsi_period = read_length(
            config,
            "indicators",
            "rsi_period",
            defaults.rsi_period,
            1..=MAX_SERIES_LENGTH,
        )?;

        let anchor_date = match config.get_string("generator", "anchor_date") {
            Some(raw) => Some(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                invalid(
                    "generator",
                    "anchor_date",
                    "invalid anchor_date format, expected YYYY-MM-DD",
                )
            })?),
            None => None,
        };

        let ma_periods = match config.get_list("indicators", "ma_periods") {
            Some(items) => parse_periods(&items)
                .map_err(|reason| invalid("indicators", "ma_periods", &reason))?,
            None => defaults.ma_periods,
        };

        let heatmap_mode = match config.get_string("heatmap", "mode") {
            Some(raw) => raw
                .parse::<HeatmapMode>()
                .map_err(|reason| invalid("heatmap", "mode", &reason))?,
            None => defaults.heatmap_mode,
        };

        let catalog_path = config
            .get_string("catalog", "path")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Settings {
            seed,
            chart_length,
            summary_length,
            anchor_date,
            rsi_period,
            ma_periods,
            heatmap_mode,
            catalog_path,
        })
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            series_length: self.summary_length,
            rsi_period: self.rsi_period,
        }
    }
}

/// Parse a list of positive periods, e.g. `["20", "50"]`.
pub fn parse_periods(items: &[String]) -> Result<Vec<usize>, String> {
    items
        .iter()
        .map(|item| match item.trim().parse::<usize>() {
            Ok(0) => Err("periods must be at least 1".to_string()),
            Ok(p) => Ok(p),
            Err(_) => Err(format!("'{}' is not a valid period", item)),
        })
        .collect()
}

fn read_length(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
    allowed: RangeInclusive<usize>,
) -> Result<usize, MarketdashError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(default);
    };
    let value = raw.trim().parse::<usize>().map_err(|_| {
        invalid(
            section,
            key,
            &format!("'{}' is not a whole number", raw.trim()),
        )
    })?;
    if !allowed.contains(&value) {
        return Err(invalid(
            section,
            key,
            &format!(
                "{} must be between {} and {}",
                key,
                allowed.start(),
                allowed.end()
            ),
        ));
    }
    Ok(value)
}

fn invalid(section: &str, key: &str, reason: &str) -> MarketdashError {
    MarketdashError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
