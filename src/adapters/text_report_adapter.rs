//! Plain-text table output for terminals.

use std::io::Write;

use crate::domain::candle::Candle;
use crate::domain::error::MarketdashError;
use crate::domain::market::{SectorHeatmapEntry, StockSummary};
use crate::ports::export_port::{ExportPort, OverlayColumn};

pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn signed(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Volume in millions, e.g. `1.23M`.
pub fn format_volume(volume: f64) -> String {
    format!("{:.2}M", volume / 1_000_000.0)
}

impl<W: Write> ExportPort for TextReport<W> {
    fn write_series(
        &mut self,
        symbol: &str,
        candles: &[Candle],
        overlays: &[OverlayColumn<'_>],
    ) -> Result<(), MarketdashError> {
        writeln!(self.out, "{} ({} candles)", symbol, candles.len())?;
        write!(
            self.out,
            "{:<10} {:>10} {:>10} {:>10} {:>10} {:>9}",
            "Date", "Open", "High", "Low", "Close", "Volume"
        )?;
        for column in overlays {
            write!(self.out, " {:>10}", column.indicator.to_string())?;
        }
        writeln!(self.out)?;

        for (i, c) in candles.iter().enumerate() {
            write!(
                self.out,
                "{:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>9}",
                c.date_string(),
                c.open,
                c.high,
                c.low,
                c.close,
                format_volume(c.volume as f64)
            )?;
            for column in overlays {
                let cell = column
                    .values
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|v| format!("{:.2}", v))
                    .unwrap_or_else(|| "-".to_string());
                write!(self.out, " {:>10}", cell)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_summaries(&mut self, summaries: &[&StockSummary]) -> Result<(), MarketdashError> {
        writeln!(
            self.out,
            "{:<11} {:<15} {:>10} {:>9} {:>8} {:>8} {:>6} {:<6}",
            "Symbol", "Sector", "Price", "Change", "Chg%", "Volume", "RSI", "Signal"
        )?;
        for s in summaries {
            writeln!(
                self.out,
                "{:<11} {:<15} {:>10.2} {:>9} {:>8} {:>8} {:>6.1} {:<6}",
                s.symbol,
                s.sector.as_str(),
                s.price,
                signed(s.change),
                format!("{}%", signed(s.change_pct)),
                format_volume(s.volume as f64),
                s.rsi,
                s.signal.as_str()
            )?;
        }
        Ok(())
    }

    fn write_heatmap(&mut self, entries: &[SectorHeatmapEntry]) -> Result<(), MarketdashError> {
        for entry in entries {
            writeln!(
                self.out,
                "{:<15} {:>7}%",
                entry.sector.as_str(),
                signed(entry.value)
            )?;
        }
        Ok(())
    }
}
