//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{load_catalog, CsvExporter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::{format_volume, TextReport};
use crate::domain::analytics::SeriesStats;
use crate::domain::dashboard::{DashboardState, MarketContext};
use crate::domain::error::MarketdashError;
use crate::domain::generator::generate_series;
use crate::domain::indicator::panel::indicator_panel;
use crate::domain::indicator::{moving_average, IndicatorType, RsiZone};
use crate::domain::market::{
    build_heatmap, filter_summaries, ranked_heatmap, sort_summaries, summarize_all,
    summarize_security, HeatmapMode, SummarySort,
};
use crate::domain::security::Catalog;
use crate::domain::settings::{parse_periods, Settings};
use crate::ports::export_port::{ExportPort, OverlayColumn};

#[derive(Parser, Debug)]
#[command(
    name = "marketdash",
    about = "Synthetic market data and technical analytics"
)]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Seed for reproducible output (overrides [generator] seed)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the security catalog
    Securities,
    /// Generate a candle series with moving-average columns
    Series {
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        count: Option<usize>,
        /// Comma-separated moving-average periods, e.g. 20,50
        #[arg(long)]
        ma: Option<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print a table instead of CSV
        #[arg(long)]
        table: bool,
    },
    /// Summarize every security in the catalog
    Summary {
        /// Keep rows whose symbol, name or sector contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// symbol | price | change_pct | volume | rsi
        #[arg(long)]
        sort: Option<SummarySort>,
        /// Sort largest first
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sector heatmap
    Heatmap {
        /// random | sector_change
        #[arg(long)]
        mode: Option<HeatmapMode>,
        /// Order sectors by value, largest first
        #[arg(long)]
        ranked: bool,
    },
    /// Indicator panel and series statistics for one symbol
    Indicators {
        #[arg(long)]
        symbol: String,
    },
    /// One-shot dashboard overview
    Dashboard {
        /// Select this symbol instead of the first catalog entry
        #[arg(long)]
        symbol: Option<String>,
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        sort: Option<SummarySort>,
        #[arg(long, requires = "sort")]
        desc: bool,
    },
}

/// Install the stderr log subscriber. `MARKETDASH_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("MARKETDASH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Settings, catalog, anchor date and random source for one invocation.
pub struct Runtime {
    pub settings: Settings,
    pub catalog: Catalog,
    pub anchor: NaiveDate,
    pub rng: StdRng,
}

impl Runtime {
    pub fn from_settings(settings: Settings) -> Result<Self, MarketdashError> {
        let catalog = match &settings.catalog_path {
            Some(path) => {
                eprintln!("Loading catalog from {}", path.display());
                load_catalog(path)?
            }
            None => Catalog::large_cap(),
        };
        let anchor = settings
            .anchor_date
            .unwrap_or_else(|| Local::now().date_naive());
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            settings,
            catalog,
            anchor,
            rng,
        })
    }
}

pub fn load_settings(
    config_path: Option<&PathBuf>,
    seed_override: Option<u64>,
) -> Result<Settings, MarketdashError> {
    let mut settings = match config_path {
        Some(path) => {
            eprintln!("Loading config from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            Settings::from_config(&adapter)?
        }
        None => Settings::default(),
    };
    if seed_override.is_some() {
        settings.seed = seed_override;
    }
    Ok(settings)
}

pub fn run(cli: Cli) -> ExitCode {
    let result = load_settings(cli.config.as_ref(), cli.seed)
        .and_then(Runtime::from_settings)
        .and_then(|mut runtime| dispatch(&mut runtime, cli.command));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn dispatch(runtime: &mut Runtime, command: Command) -> Result<(), MarketdashError> {
    match command {
        Command::Securities => run_securities(runtime),
        Command::Series {
            symbol,
            count,
            ma,
            output,
            table,
        } => {
            let symbol = symbol.trim().to_uppercase();
            let periods = resolve_ma_periods(ma.as_deref(), &runtime.settings)?;
            let count = count.unwrap_or(runtime.settings.chart_length);
            match (output, table) {
                (Some(path), _) => {
                    let mut exporter = CsvExporter::new(BufWriter::new(File::create(&path)?));
                    export_series(runtime, &symbol, count, &periods, &mut exporter)?;
                    exporter.into_inner()?;
                    eprintln!("Series written to: {}", path.display());
                    Ok(())
                }
                (None, true) => {
                    let mut report = TextReport::new(io::stdout().lock());
                    export_series(runtime, &symbol, count, &periods, &mut report)
                }
                (None, false) => {
                    let mut exporter = CsvExporter::new(io::stdout().lock());
                    export_series(runtime, &symbol, count, &periods, &mut exporter)
                }
            }
        }
        Command::Summary {
            query,
            sort,
            desc,
            output,
        } => match output {
            Some(path) => {
                let mut exporter = CsvExporter::new(BufWriter::new(File::create(&path)?));
                export_summaries(runtime, query.as_deref(), sort, desc, &mut exporter)?;
                exporter.into_inner()?;
                eprintln!("Summaries written to: {}", path.display());
                Ok(())
            }
            None => {
                let mut report = TextReport::new(io::stdout().lock());
                export_summaries(runtime, query.as_deref(), sort, desc, &mut report)
            }
        },
        Command::Heatmap { mode, ranked } => {
            let mode = mode.unwrap_or(runtime.settings.heatmap_mode);
            let mut report = TextReport::new(io::stdout().lock());
            export_heatmap(runtime, mode, ranked, &mut report)
        }
        Command::Indicators { symbol } => run_indicators(runtime, &symbol.trim().to_uppercase()),
        Command::Dashboard {
            symbol,
            query,
            sort,
            desc,
        } => {
            let symbol = symbol.map(|s| s.trim().to_uppercase());
            let state = build_dashboard(runtime, symbol.as_deref(), query.as_deref())?;
            print_dashboard(&state, sort, desc)
        }
    }
}

/// `--ma` wins over the configured periods.
pub fn resolve_ma_periods(
    flag: Option<&str>,
    settings: &Settings,
) -> Result<Vec<usize>, MarketdashError> {
    match flag {
        Some(raw) => {
            let items: Vec<String> = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            parse_periods(&items).map_err(|reason| MarketdashError::InvalidArgument {
                flag: "ma".to_string(),
                reason,
            })
        }
        None => Ok(settings.ma_periods.clone()),
    }
}

fn run_securities(runtime: &Runtime) -> Result<(), MarketdashError> {
    for s in runtime.catalog.securities() {
        println!(
            "{:<11} {:<24} {:<15} {:>10.2}",
            s.symbol, s.name, s.sector, s.base_price
        );
    }
    eprintln!("{} securities", runtime.catalog.len());
    Ok(())
}

pub fn export_series(
    runtime: &mut Runtime,
    symbol: &str,
    count: usize,
    ma_periods: &[usize],
    exporter: &mut dyn ExportPort,
) -> Result<(), MarketdashError> {
    let candles = generate_series(&mut runtime.rng, &runtime.catalog, symbol, count, runtime.anchor)?;
    let averages: Vec<Vec<Option<f64>>> = ma_periods
        .iter()
        .map(|&p| moving_average(&candles, p))
        .collect();
    let overlays: Vec<OverlayColumn<'_>> = ma_periods
        .iter()
        .zip(&averages)
        .map(|(&p, values)| OverlayColumn {
            indicator: IndicatorType::Sma(p),
            values: values.as_slice(),
        })
        .collect();
    exporter.write_series(symbol, &candles, &overlays)
}

/// Summaries matching `query`, in catalog order unless `sort` is given.
pub fn export_summaries(
    runtime: &mut Runtime,
    query: Option<&str>,
    sort: Option<SummarySort>,
    descending: bool,
    exporter: &mut dyn ExportPort,
) -> Result<(), MarketdashError> {
    let options = runtime.settings.summary_options();
    let summaries = summarize_all(&mut runtime.rng, &runtime.catalog, runtime.anchor, &options)?;
    let mut visible = filter_summaries(&summaries, query.unwrap_or(""));
    if let Some(key) = sort {
        sort_summaries(&mut visible, key, descending);
    }
    eprintln!("{} of {} securities", visible.len(), summaries.len());
    exporter.write_summaries(&visible)
}

pub fn export_heatmap(
    runtime: &mut Runtime,
    mode: HeatmapMode,
    ranked: bool,
    exporter: &mut dyn ExportPort,
) -> Result<(), MarketdashError> {
    let summaries = match mode {
        HeatmapMode::Random => Vec::new(),
        HeatmapMode::SectorChange => {
            let options = runtime.settings.summary_options();
            summarize_all(&mut runtime.rng, &runtime.catalog, runtime.anchor, &options)?
        }
    };
    let entries = build_heatmap(&mut runtime.rng, mode, &summaries);
    if ranked {
        exporter.write_heatmap(&ranked_heatmap(&entries))
    } else {
        exporter.write_heatmap(&entries)
    }
}

fn run_indicators(runtime: &mut Runtime, symbol: &str) -> Result<(), MarketdashError> {
    let security = runtime.catalog.lookup(symbol);
    let options = runtime.settings.summary_options();
    let summary = summarize_security(
        &mut runtime.rng,
        &runtime.catalog,
        &security,
        runtime.anchor,
        &options,
    )?;
    let chart = generate_series(
        &mut runtime.rng,
        &runtime.catalog,
        symbol,
        runtime.settings.chart_length,
        runtime.anchor,
    )?;

    println!("{} ({}, {})", summary.symbol, summary.name, summary.sector);
    println!(
        "  Price:  {:.2}  ({:+.2}, {:+.2}%)",
        summary.price, summary.change, summary.change_pct
    );
    println!(
        "  RSI:    {:.1} {}  signal {}",
        summary.rsi,
        RsiZone::of(summary.rsi),
        summary.signal
    );

    println!("\nTechnical Indicators:");
    for reading in indicator_panel(&mut runtime.rng, summary.rsi, summary.price, summary.change_pct) {
        println!(
            "  {:<12} {:>10.2}  {:<4}  {}",
            reading.name,
            reading.value,
            reading.signal(),
            reading.description
        );
    }

    if let Some(stats) = SeriesStats::compute(&chart) {
        println!("\nSeries ({} candles):", stats.candle_count);
        println!("  Day range:    {:.2} - {:.2}", stats.last.low, stats.last.high);
        println!("  Week range:   {:.0} - {:.0}", stats.week_low, stats.week_high);
        println!("  Full range:   {:.0} - {:.0}", stats.range_low, stats.range_high);
        println!("  Total return: {:+.2}%", stats.total_return_pct);
        println!("  Avg volume:   {}", format_volume(stats.avg_volume));
    }
    Ok(())
}

/// Initialize a dashboard, then apply the optional selection and search query.
pub fn build_dashboard(
    runtime: &mut Runtime,
    symbol: Option<&str>,
    query: Option<&str>,
) -> Result<DashboardState, MarketdashError> {
    let ctx = MarketContext {
        catalog: &runtime.catalog,
        anchor: runtime.anchor,
        chart_length: runtime.settings.chart_length,
        summary: runtime.settings.summary_options(),
        heatmap_mode: runtime.settings.heatmap_mode,
    };
    let mut state = DashboardState::new(ctx.catalog);
    state.initialize(&mut runtime.rng, &ctx)?;
    if let Some(symbol) = symbol {
        state.select_symbol(&mut runtime.rng, &ctx, symbol)?;
    }
    if let Some(query) = query {
        state.set_search_query(query);
    }
    Ok(state)
}

fn print_dashboard(
    state: &DashboardState,
    sort: Option<SummarySort>,
    descending: bool,
) -> Result<(), MarketdashError> {
    match state.selected_summary() {
        Some(s) => println!(
            "{} ({})  {:.2}  {:+.2}%  RSI {:.1}  {}",
            s.symbol, s.sector, s.price, s.change_pct, s.rsi, s.signal
        ),
        None => println!("{}", state.selected_symbol),
    }
    if let Some(stats) = state.chart_stats() {
        println!(
            "  {} candles, {:+.2}% total, range {:.0} - {:.0}",
            stats.candle_count, stats.total_return_pct, stats.range_low, stats.range_high
        );
    }

    let mut report = TextReport::new(io::stdout().lock());
    println!("\nSectors:");
    report.write_heatmap(&ranked_heatmap(&state.sectors))?;

    let mut visible = state.visible_summaries();
    if let Some(key) = sort {
        sort_summaries(&mut visible, key, descending);
    }
    println!("\nMarket:");
    report.write_summaries(&visible)
}
