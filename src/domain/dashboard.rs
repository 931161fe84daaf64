//! Caller-owned dashboard state.
//!
//! Holds the current selection, chart series, summaries and heatmap plus the
//! UI toggles. The pipeline functions stay pure; this container only records
//! their latest output. Nothing here schedules work or simulates latency.

use chrono::NaiveDate;
use rand::Rng;

use crate::domain::analytics::SeriesStats;
use crate::domain::candle::Candle;
use crate::domain::error::MarketdashError;
use crate::domain::generator::{generate_series, DEFAULT_SERIES_LENGTH};
use crate::domain::market::{
    build_heatmap, filter_summaries, summarize_all, HeatmapMode, SectorHeatmapEntry, StockSummary,
    SummaryOptions,
};
use crate::domain::security::Catalog;

/// Everything a refresh needs besides the random source.
#[derive(Debug, Clone)]
pub struct MarketContext<'a> {
    pub catalog: &'a Catalog,
    pub anchor: NaiveDate,
    pub chart_length: usize,
    pub summary: SummaryOptions,
    pub heatmap_mode: HeatmapMode,
}

impl<'a> MarketContext<'a> {
    pub fn new(catalog: &'a Catalog, anchor: NaiveDate) -> Self {
        Self {
            catalog,
            anchor,
            chart_length: DEFAULT_SERIES_LENGTH,
            summary: SummaryOptions::default(),
            heatmap_mode: HeatmapMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub selected_symbol: String,
    pub chart: Vec<Candle>,
    pub summaries: Vec<StockSummary>,
    pub sectors: Vec<SectorHeatmapEntry>,
    pub dark_mode: bool,
    pub search_query: String,
    pub loading: bool,
}

impl DashboardState {
    /// Empty state selecting the first catalog entry, dark mode on.
    pub fn new(catalog: &Catalog) -> Self {
        let selected_symbol = catalog
            .securities()
            .first()
            .map(|s| s.symbol.clone())
            .unwrap_or_default();
        Self {
            selected_symbol,
            chart: Vec::new(),
            summaries: Vec::new(),
            sectors: Vec::new(),
            dark_mode: true,
            search_query: String::new(),
            loading: false,
        }
    }

    /// Fill chart, summaries and heatmap for the first catalog entry.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ctx: &MarketContext<'_>,
    ) -> Result<(), MarketdashError> {
        if let Some(first) = ctx.catalog.securities().first() {
            self.selected_symbol = first.symbol.clone();
        }
        self.reload_all(rng, ctx)
    }

    /// Select a symbol and regenerate its chart. Summaries are left alone.
    /// On failure the previous selection and chart stay in place.
    pub fn select_symbol<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ctx: &MarketContext<'_>,
        symbol: &str,
    ) -> Result<(), MarketdashError> {
        self.begin_loading();
        let chart = generate_series(rng, ctx.catalog, symbol, ctx.chart_length, ctx.anchor);
        self.finish_loading();
        self.chart = chart?;
        self.selected_symbol = symbol.to_string();
        Ok(())
    }

    /// Regenerate chart, summaries and heatmap for the current selection.
    pub fn refresh<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ctx: &MarketContext<'_>,
    ) -> Result<(), MarketdashError> {
        self.reload_all(rng, ctx)
    }

    fn reload_all<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        ctx: &MarketContext<'_>,
    ) -> Result<(), MarketdashError> {
        self.begin_loading();
        let result = load_all(rng, ctx, &self.selected_symbol);
        self.finish_loading();

        let (chart, summaries, sectors) = result?;
        self.chart = chart;
        self.summaries = summaries;
        self.sectors = sectors;
        Ok(())
    }

    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    pub fn finish_loading(&mut self) {
        self.loading = false;
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    /// Summaries matching the current search query.
    pub fn visible_summaries(&self) -> Vec<&StockSummary> {
        filter_summaries(&self.summaries, &self.search_query)
    }

    pub fn selected_summary(&self) -> Option<&StockSummary> {
        self.summaries
            .iter()
            .find(|s| s.symbol == self.selected_symbol)
    }

    pub fn chart_stats(&self) -> Option<SeriesStats> {
        SeriesStats::compute(&self.chart)
    }
}

type Snapshot = (Vec<Candle>, Vec<StockSummary>, Vec<SectorHeatmapEntry>);

fn load_all<R: Rng + ?Sized>(
    rng: &mut R,
    ctx: &MarketContext<'_>,
    symbol: &str,
) -> Result<Snapshot, MarketdashError> {
    let chart = generate_series(rng, ctx.catalog, symbol, ctx.chart_length, ctx.anchor)?;
    let summaries = summarize_all(rng, ctx.catalog, ctx.anchor, &ctx.summary)?;
    let sectors = build_heatmap(rng, ctx.heatmap_mode, &summaries);
    Ok((chart, summaries, sectors))
}
