//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::backend::select_backend;
use crate::adapters::csv_adapter::CsvDirectoryAdapter;
use crate::adapters::drawdown_adapter::DrawdownAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::summary_report::{format_indicator_table, format_metrics_table, write_metrics_csv};
use crate::adapters::svg_chart::SvgChartAdapter;
use crate::domain::analysis::{SymbolAnalysis, analyze_universe, total_rows};
use crate::domain::config_validation::AnalysisConfig;
use crate::domain::error::PricelensError;
use crate::domain::indicator::compute_indicators_with;
use crate::domain::metrics::MetricsSummary;
use crate::ports::data_port::DataPort;
use crate::ports::performance_port::PerformancePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "pricelens",
    about = "Technical indicators and risk/return metrics for daily price files"
)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to find settings and price files.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// INI config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory of <SYMBOL>.csv files
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators and metrics for every symbol, write charts
    Analyze {
        #[command(flatten)]
        source: SourceArgs,
        /// Directory for chart files
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Indicator backend: auto, native or recurrence
        #[arg(short, long)]
        backend: Option<String>,
        #[arg(long)]
        no_charts: bool,
        /// Also write the metrics table as CSV
        #[arg(long)]
        metrics_csv: Option<PathBuf>,
    },
    /// List symbols found in the data directory
    ListSymbols {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the last indicator rows for one symbol
    Indicators {
        #[arg(short, long)]
        symbol: String,
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long)]
        backend: Option<String>,
        #[arg(short, long, default_value_t = 10)]
        tail: usize,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub backend: Option<String>,
    pub no_charts: bool,
    pub metrics_csv: Option<PathBuf>,
}

/// What an `analyze` run produced.
#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub rows: usize,
    pub summaries: Vec<MetricsSummary>,
    pub figures: Vec<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            source,
            out,
            backend,
            no_charts,
            metrics_csv,
        } => {
            let overrides = Overrides {
                data_dir: source.data_dir,
                out,
                backend,
                no_charts,
                metrics_csv,
            };
            run_analyze(source.config.as_deref(), &overrides).map(|_| ())
        }
        Command::ListSymbols { source } => run_list_symbols(&source),
        Command::Indicators {
            symbol,
            source,
            backend,
            tail,
        } => run_indicators(&symbol, &source, backend, tail),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PricelensError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path)
}

/// Typed config from an optional INI file, with command-line overrides applied.
pub fn resolve_config(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<AnalysisConfig, PricelensError> {
    let mut config = match config_path {
        Some(path) => AnalysisConfig::from_config(&load_config(path)?)?,
        None => AnalysisConfig::default(),
    };

    if let Some(dir) = &overrides.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &overrides.out {
        config.figures_dir = dir.clone();
    }
    if let Some(name) = &overrides.backend {
        config.backend = name.parse()?;
    }
    if overrides.no_charts {
        config.charts = false;
    }
    if let Some(path) = &overrides.metrics_csv {
        config.metrics_csv = Some(path.clone());
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn source_config(source: &SourceArgs, backend: Option<String>) -> Result<AnalysisConfig, PricelensError> {
    let overrides = Overrides {
        data_dir: source.data_dir.clone(),
        backend,
        ..Overrides::default()
    };
    resolve_config(source.config.as_deref(), &overrides)
}

/// Full pipeline: load, analyze in parallel, print the metrics table, then
/// write the optional CSV and charts.
pub fn run_analyze(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<AnalyzeOutcome, PricelensError> {
    let config = resolve_config(config_path, overrides)?;

    // Stage 1: load every readable CSV
    let data = CsvDirectoryAdapter::new(&config.data_dir);
    let universe = data.load_all()?;
    if universe.is_empty() {
        return Err(PricelensError::NoData {
            reason: format!("no readable CSV files in {}", config.data_dir.display()),
        });
    }

    // Stage 2: indicators and metrics per symbol
    let backend = select_backend(config.backend)?;
    let drawdown = DrawdownAdapter;
    let source: Option<&dyn PerformancePort> = if config.max_drawdown {
        Some(&drawdown)
    } else {
        None
    };
    let analyses: Vec<SymbolAnalysis> = analyze_universe(universe, backend.as_ref(), source);
    let rows = total_rows(&analyses);
    println!("Loaded {} rows for {} symbols", rows, analyses.len());

    // Stage 3: reports
    let summaries: Vec<MetricsSummary> = analyses.iter().map(|a| a.metrics.clone()).collect();
    println!();
    print!("{}", format_metrics_table(&summaries));

    if let Some(path) = &config.metrics_csv {
        write_metrics_csv(path, &summaries)?;
    }

    let figures = if config.charts {
        let charts = SvgChartAdapter::new(&config.figures_dir);
        let written = charts.write_all(&analyses)?;
        println!(
            "Saved {} figures to {}",
            written.len(),
            config.figures_dir.display()
        );
        written
    } else {
        Vec::new()
    };

    Ok(AnalyzeOutcome {
        rows,
        summaries,
        figures,
    })
}

fn run_list_symbols(source: &SourceArgs) -> Result<(), PricelensError> {
    let config = source_config(source, None)?;
    let data = CsvDirectoryAdapter::new(&config.data_dir);
    for symbol in data.list_symbols()? {
        println!("{}", symbol);
    }
    Ok(())
}

fn run_indicators(
    symbol: &str,
    source: &SourceArgs,
    backend: Option<String>,
    tail: usize,
) -> Result<(), PricelensError> {
    let config = source_config(source, backend)?;
    let data = CsvDirectoryAdapter::new(&config.data_dir);
    let series = data.load_series(symbol)?;
    let backend = select_backend(config.backend)?;

    let rows = compute_indicators_with(&series, backend.as_ref());
    let start = rows.len().saturating_sub(tail);
    eprintln!(
        "{}: {} rows, showing last {}",
        series.symbol(),
        rows.len(),
        rows.len() - start
    );
    print!("{}", format_indicator_table(&rows[start..]));
    Ok(())
}
