//! CSV directory data adapter.
//!
//! One file per symbol, `<SYMBOL>.csv`, with at least the columns Date,
//! Open, High, Low, Close and Volume. Header names are trimmed and matched
//! case-insensitively.

use crate::domain::error::PricelensError;
use crate::domain::ohlcv::{OhlcvBar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

pub const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

pub struct CsvDirectoryAdapter {
    base_path: PathBuf,
}

/// Positions of the required columns within a header row.
struct ColumnIndex {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord, file: &str) -> Result<Self, PricelensError> {
        let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| normalized.iter().position(|h| h == &name.to_lowercase());

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PricelensError::MissingColumns {
                file: file.to_string(),
                columns: missing,
            });
        }

        // every lookup is known to succeed past the check above
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            date: at("Date"),
            open: at("Open"),
            high: at("High"),
            low: at("Low"),
            close: at("Close"),
            volume: at("Volume"),
        })
    }
}

impl CsvDirectoryAdapter {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    /// Load every listed symbol, skipping (and logging) files that fail.
    pub fn load_all(&self) -> Result<Vec<PriceSeries>, PricelensError> {
        let symbols = self.list_symbols()?;
        let mut universe = Vec::with_capacity(symbols.len());

        for symbol in &symbols {
            match self.load_series(symbol) {
                Ok(series) => universe.push(series),
                Err(e) => tracing::warn!(symbol = %symbol, error = %e, "skipping file"),
            }
        }

        Ok(universe)
    }
}

impl DataPort for CsvDirectoryAdapter {
    fn list_symbols(&self) -> Result<Vec<String>, PricelensError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| PricelensError::NoData {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                symbols.push(stem.to_string());
            }
        }

        if symbols.is_empty() {
            return Err(PricelensError::NoData {
                reason: format!("no CSV files found in {}", self.base_path.display()),
            });
        }

        symbols.sort();
        Ok(symbols)
    }

    fn load_series(&self, symbol: &str) -> Result<PriceSeries, PricelensError> {
        let path = self.csv_path(symbol);
        let file = path.display().to_string();
        let content = fs::read_to_string(&path).map_err(|e| PricelensError::NoData {
            reason: format!("failed to read {}: {}", file, e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers().map_err(|e| PricelensError::CsvParse {
            file: file.clone(),
            reason: e.to_string(),
        })?;
        let columns = ColumnIndex::from_headers(headers, &file)?;

        let mut bars = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| PricelensError::CsvParse {
                file: file.clone(),
                reason: e.to_string(),
            })?;
            // header is line 1
            let line = row + 2;
            let field = |index: usize, name: &str| {
                record.get(index).ok_or_else(|| PricelensError::CsvParse {
                    file: file.clone(),
                    reason: format!("line {}: missing {} value", line, name),
                })
            };
            let number = |index: usize, name: &str| -> Result<f64, PricelensError> {
                let raw = field(index, name)?;
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| PricelensError::CsvParse {
                        file: file.clone(),
                        reason: format!("line {}: invalid {} value '{}'", line, name, raw),
                    })
            };

            let raw_date = field(columns.date, "Date")?;
            let date = parse_date(raw_date).ok_or_else(|| PricelensError::CsvParse {
                file: file.clone(),
                reason: format!("line {}: invalid date '{}'", line, raw_date),
            })?;

            bars.push(OhlcvBar {
                date,
                open: number(columns.open, "Open")?,
                high: number(columns.high, "High")?,
                low: number(columns.low, "Low")?,
                close: number(columns.close, "Close")?,
                volume: number(columns.volume, "Volume")?.round() as i64,
            });
        }

        bars.sort_by_key(|b| b.date);
        tracing::debug!(symbol = %symbol, bars = bars.len(), "loaded CSV");
        PriceSeries::new(symbol, bars)
    }
}

/// Parse `YYYY-MM-DD`, ignoring any time or UTC-offset suffix.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    })
}
