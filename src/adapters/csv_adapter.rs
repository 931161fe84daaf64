//! CSV adapter: exports generated data and loads custom security catalogs.

use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::domain::candle::Candle;
use crate::domain::error::MarketdashError;
use crate::domain::market::{SectorHeatmapEntry, StockSummary};
use crate::domain::security::{Catalog, Sector, Security};
use crate::ports::export_port::{ExportPort, OverlayColumn};

pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvExporter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().flexible(true).from_writer(inner),
        }
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, MarketdashError> {
        self.writer
            .into_inner()
            .map_err(|e| MarketdashError::Export {
                reason: format!("failed to flush CSV output: {}", e.error()),
            })
    }
}

impl<W: Write> ExportPort for CsvExporter<W> {
    fn write_series(
        &mut self,
        symbol: &str,
        candles: &[Candle],
        overlays: &[OverlayColumn<'_>],
    ) -> Result<(), MarketdashError> {
        if let Some(column) = overlays.iter().find(|c| c.values.len() != candles.len()) {
            return Err(MarketdashError::Export {
                reason: format!(
                    "{} column for {} has {} values, series has {}",
                    column.indicator,
                    symbol,
                    column.values.len(),
                    candles.len()
                ),
            });
        }

        let mut header: Vec<String> = ["date", "open", "high", "low", "close", "volume"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        header.extend(overlays.iter().map(|c| c.indicator.to_string()));
        self.writer.write_record(&header)?;

        for (i, candle) in candles.iter().enumerate() {
            let mut record = vec![
                candle.date_string(),
                format!("{:.2}", candle.open),
                format!("{:.2}", candle.high),
                format!("{:.2}", candle.low),
                format!("{:.2}", candle.close),
                candle.volume.to_string(),
            ];
            record.extend(
                overlays
                    .iter()
                    .map(|c| c.values[i].map(|v| format!("{:.2}", v)).unwrap_or_default()),
            );
            self.writer.write_record(&record)?;
        }

        self.writer.flush()?;
        Ok(())
    }

    fn write_summaries(&mut self, summaries: &[&StockSummary]) -> Result<(), MarketdashError> {
        self.writer.write_record([
            "symbol",
            "name",
            "sector",
            "price",
            "change",
            "change_pct",
            "volume",
            "rsi",
            "signal",
        ])?;
        for s in summaries {
            self.writer.write_record([
                s.symbol.clone(),
                s.name.clone(),
                s.sector.to_string(),
                format!("{:.2}", s.price),
                format!("{:.2}", s.change),
                format!("{:.2}", s.change_pct),
                s.volume.to_string(),
                format!("{:.2}", s.rsi),
                s.signal.to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_heatmap(&mut self, entries: &[SectorHeatmapEntry]) -> Result<(), MarketdashError> {
        self.writer.write_record(["sector", "value"])?;
        for entry in entries {
            self.writer
                .write_record([entry.sector.to_string(), format!("{:.2}", entry.value)])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Load a catalog from a `symbol,name,sector,base_price` CSV file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, MarketdashError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| MarketdashError::Catalog {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    read_catalog(file)
}

pub fn read_catalog<R: Read>(reader: R) -> Result<Catalog, MarketdashError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut securities = Vec::new();
    let mut seen = HashSet::new();

    for (row, result) in rdr.records().enumerate() {
        let line = row + 2;
        let record = result.map_err(|e| MarketdashError::Catalog {
            reason: format!("CSV parse error: {}", e),
        })?;

        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| MarketdashError::Catalog {
                    reason: format!("line {}: missing {} column", line, name),
                })
        };

        let symbol = field(0, "symbol")?.to_uppercase();
        let name = field(1, "name")?;
        let sector: Sector = field(2, "sector")?
            .parse()
            .map_err(|e| MarketdashError::Catalog {
                reason: format!("line {}: {}", line, e),
            })?;
        let base_price: f64 = field(3, "base_price")?
            .parse()
            .map_err(|e| MarketdashError::Catalog {
                reason: format!("line {}: invalid base_price: {}", line, e),
            })?;

        if !(base_price.is_finite() && base_price > 0.0) {
            return Err(MarketdashError::Catalog {
                reason: format!("line {}: base_price must be positive", line),
            });
        }
        if !seen.insert(symbol.clone()) {
            return Err(MarketdashError::Catalog {
                reason: format!("line {}: duplicate symbol {}", line, symbol),
            });
        }

        securities.push(Security::new(&symbol, name, sector, base_price));
    }

    if securities.is_empty() {
        return Err(MarketdashError::Catalog {
            reason: "catalog contains no securities".into(),
        });
    }

    tracing::debug!(securities = securities.len(), "loaded catalog from CSV");
    Ok(Catalog::from_securities(securities))
}
