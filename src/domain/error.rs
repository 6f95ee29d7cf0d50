//! Domain error types.
//!
//! The engine itself never fails on well-formed input; these errors come
//! from the adapters (CSV loading, config, rendering) and from optional
//! backends that callers degrade rather than propagate.

use chrono::NaiveDate;

/// Top-level error type for pricelens.
#[derive(Debug, thiserror::Error)]
pub enum PricelensError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data: {reason}")]
    NoData { reason: String },

    #[error("CSV error in {file}: {reason}")]
    CsvParse { file: String, reason: String },

    #[error("{file} is missing required columns: {}", columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    #[error("dates out of order for {symbol}: {previous} followed by {next}")]
    UnorderedDates {
        symbol: String,
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("duplicate date {date} for {symbol}")]
    DuplicateDate { symbol: String, date: NaiveDate },

    #[error("indicator backend '{name}' is not available in this build")]
    BackendUnavailable { name: String },

    #[error("metric unavailable: {reason}")]
    Metric { reason: String },

    #[error("render error: {reason}")]
    Render { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PricelensError> for std::process::ExitCode {
    fn from(err: &PricelensError) -> Self {
        let code: u8 = match err {
            PricelensError::Io(_) | PricelensError::Render { .. } => 1,
            PricelensError::ConfigParse { .. } | PricelensError::ConfigInvalid { .. } => 2,
            PricelensError::NoData { .. }
            | PricelensError::CsvParse { .. }
            | PricelensError::MissingColumns { .. }
            | PricelensError::UnorderedDates { .. }
            | PricelensError::DuplicateDate { .. } => 3,
            PricelensError::BackendUnavailable { .. } | PricelensError::Metric { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
