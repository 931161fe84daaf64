//! Export port: where generated series and aggregates are written.

use crate::domain::candle::Candle;
use crate::domain::error::MarketdashError;
use crate::domain::indicator::IndicatorType;
use crate::domain::market::{SectorHeatmapEntry, StockSummary};

/// A moving-average column aligned with the candle series it was computed from.
pub struct OverlayColumn<'a> {
    pub indicator: IndicatorType,
    pub values: &'a [Option<f64>],
}

pub trait ExportPort {
    fn write_series(
        &mut self,
        symbol: &str,
        candles: &[Candle],
        overlays: &[OverlayColumn<'_>],
    ) -> Result<(), MarketdashError>;

    fn write_summaries(&mut self, summaries: &[&StockSummary]) -> Result<(), MarketdashError>;

    fn write_heatmap(&mut self, entries: &[SectorHeatmapEntry]) -> Result<(), MarketdashError>;
}
