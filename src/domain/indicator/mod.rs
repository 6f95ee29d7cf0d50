//! Technical indicator engine.
//!
//! This module provides types for representing indicator output and the
//! engine entry points:
//! - `IndicatorRow`: one close-aligned row of derived values per input bar
//! - `IndicatorType`: indicator identity + parameters, used for labelling
//! - `BackendKind`: which `IndicatorPort` implementation to run
//! - `RecurrenceBackend`: the reference implementation of every indicator
//!
//! Undefined values (warm-up rows, flat RSI windows) are `None`, never NaN.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::calculate_ema;
pub use macd::calculate_macd;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;

use crate::domain::error::PricelensError;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::indicator_port::IndicatorPort;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub const SMA_PERIOD: usize = 20;
pub const EMA_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;

/// MACD line and signal, index-aligned to the closes they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    pub date: NaiveDate,
    pub close: f64,
    pub sma_20: Option<f64>,
    pub ema_20: Option<f64>,
    pub rsi_14: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
}

impl IndicatorRow {
    /// MACD line minus signal, when both are defined.
    pub fn macd_histogram(&self) -> Option<f64> {
        Some(self.macd? - self.macd_signal?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
}

impl IndicatorType {
    /// The indicators every `IndicatorRow` carries, in column order.
    pub fn standard_set() -> [IndicatorType; 4] {
        [
            IndicatorType::Sma(SMA_PERIOD),
            IndicatorType::Ema(EMA_PERIOD),
            IndicatorType::Rsi(RSI_PERIOD),
            IndicatorType::Macd {
                fast: macd::DEFAULT_FAST,
                slow: macd::DEFAULT_SLOW,
                signal: macd::DEFAULT_SIGNAL,
            },
        ]
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
            IndicatorType::Macd { fast, slow, signal } => {
                write!(f, "MACD({},{},{})", fast, slow, signal)
            }
        }
    }
}

/// Which indicator backend to run.
///
/// `Auto` resolves to the native backend when the crate was built with it,
/// otherwise to the recurrence backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Auto,
    Native,
    Recurrence,
}

impl FromStr for BackendKind {
    type Err = PricelensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(BackendKind::Auto),
            "native" | "ta" => Ok(BackendKind::Native),
            "recurrence" | "fallback" => Ok(BackendKind::Recurrence),
            other => Err(PricelensError::ConfigInvalid {
                section: "engine".into(),
                key: "backend".into(),
                reason: format!(
                    "unknown backend '{}' (expected auto, native or recurrence)",
                    other
                ),
            }),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Auto => write!(f, "auto"),
            BackendKind::Native => write!(f, "native"),
            BackendKind::Recurrence => write!(f, "recurrence"),
        }
    }
}

/// Reference implementation of every indicator, with no dependencies
/// beyond this module.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceBackend;

impl IndicatorPort for RecurrenceBackend {
    fn name(&self) -> &'static str {
        "recurrence"
    }

    fn sma(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        calculate_sma(closes, period)
    }

    fn ema(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        calculate_ema(closes, period)
    }

    fn rsi(&self, closes: &[f64], period: usize) -> Vec<Option<f64>> {
        calculate_rsi(closes, period)
    }

    fn macd(&self, closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
        calculate_macd(closes, fast, slow, signal)
    }
}

/// Indicator rows for one series using the reference backend.
pub fn compute_indicators(series: &PriceSeries) -> Vec<IndicatorRow> {
    compute_indicators_with(series, &RecurrenceBackend)
}

/// Indicator rows for one series, one row per bar, using `backend`.
pub fn compute_indicators_with(
    series: &PriceSeries,
    backend: &dyn IndicatorPort,
) -> Vec<IndicatorRow> {
    let closes = series.closes();

    let sma = backend.sma(&closes, SMA_PERIOD);
    let ema = backend.ema(&closes, EMA_PERIOD);
    let rsi = backend.rsi(&closes, RSI_PERIOD);
    let macd = backend.macd(
        &closes,
        macd::DEFAULT_FAST,
        macd::DEFAULT_SLOW,
        macd::DEFAULT_SIGNAL,
    );

    let at = |column: &[Option<f64>], i: usize| column.get(i).copied().flatten();

    series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| IndicatorRow {
            date: bar.date,
            close: bar.close,
            sma_20: at(&sma, i),
            ema_20: at(&ema, i),
            rsi_14: at(&rsi, i),
            macd: at(&macd.line, i),
            macd_signal: at(&macd.signal, i),
        })
        .collect()
}
