//! Console tables and CSV export for analysis results.

use crate::domain::error::PricelensError;
use crate::domain::indicator::IndicatorRow;
use crate::domain::metrics::{MetricsSummary, OptionalMetric};
use serde::Serialize;
use std::fs;
use std::path::Path;

const METRIC_HEADERS: [&str; 5] = [
    "Symbol",
    "Annualized Return",
    "Annualized Volatility",
    "Sharpe Ratio (approx)",
    "Observations",
];
const DRAWDOWN_HEADER: &str = "Max Drawdown";

const INDICATOR_HEADERS: [&str; 8] = [
    "Date",
    "Close",
    "SMA_20",
    "EMA_20",
    "RSI_14",
    "MACD",
    "MACD_Signal",
    "MACD_Hist",
];

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NaN".to_string(),
    }
}

fn fmt_optional(metric: &OptionalMetric) -> String {
    fmt_value(metric.value())
}

fn render_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &w))| {
            if i == 0 {
                format!("{:<w$}", cell)
            } else {
                format!("{:>w$}", cell)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Pad every column to its widest cell; the first column is left-aligned,
/// the rest right-aligned.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = render_line(headers.iter().copied(), &widths);
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn wants_drawdown(summaries: &[MetricsSummary]) -> bool {
    summaries.iter().any(|s| s.max_drawdown.is_requested())
}

/// Aligned metrics table, one row per symbol. Undefined values print as `NaN`.
pub fn format_metrics_table(summaries: &[MetricsSummary]) -> String {
    let drawdown = wants_drawdown(summaries);
    let mut headers: Vec<&str> = METRIC_HEADERS.to_vec();
    if drawdown {
        headers.push(DRAWDOWN_HEADER);
    }

    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            let mut row = vec![
                s.symbol.clone(),
                fmt_value(s.annualized_return),
                fmt_value(s.annualized_volatility),
                fmt_value(s.sharpe_ratio),
                s.observations.to_string(),
            ];
            if drawdown {
                row.push(fmt_optional(&s.max_drawdown));
            }
            row
        })
        .collect();

    render_table(&headers, &rows)
}

/// Aligned table of indicator rows, as shown by the `indicators` command.
pub fn format_indicator_table(rows: &[IndicatorRow]) -> String {
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.date.to_string(),
                format!("{:.4}", r.close),
                fmt_value(r.sma_20),
                fmt_value(r.ema_20),
                fmt_value(r.rsi_14),
                fmt_value(r.macd),
                fmt_value(r.macd_signal),
                fmt_value(r.macd_histogram()),
            ]
        })
        .collect();
    render_table(&INDICATOR_HEADERS, &body)
}

#[derive(Debug, Serialize)]
struct MetricsRecord<'a> {
    #[serde(rename = "Symbol")]
    symbol: &'a str,
    #[serde(rename = "Annualized Return")]
    annualized_return: Option<f64>,
    #[serde(rename = "Annualized Volatility")]
    annualized_volatility: Option<f64>,
    #[serde(rename = "Sharpe Ratio (approx)")]
    sharpe_ratio: Option<f64>,
    #[serde(rename = "Observations")]
    observations: usize,
    // outer None drops the column, Some(None) is an empty cell
    #[serde(rename = "Max Drawdown", skip_serializing_if = "Option::is_none")]
    max_drawdown: Option<Option<f64>>,
}

impl<'a> MetricsRecord<'a> {
    fn new(s: &'a MetricsSummary, with_drawdown: bool) -> Self {
        Self {
            symbol: &s.symbol,
            annualized_return: s.annualized_return,
            annualized_volatility: s.annualized_volatility,
            sharpe_ratio: s.sharpe_ratio,
            observations: s.observations,
            max_drawdown: with_drawdown.then(|| s.max_drawdown.value()),
        }
    }
}

fn csv_error(path: &Path, e: impl std::fmt::Display) -> PricelensError {
    PricelensError::Render {
        reason: format!("failed to write {}: {}", path.display(), e),
    }
}

/// Write the metrics table as CSV. Undefined values become empty cells.
pub fn write_metrics_csv(path: &Path, summaries: &[MetricsSummary]) -> Result<(), PricelensError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let drawdown = wants_drawdown(summaries);
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;

    if summaries.is_empty() {
        // serde writes headers with the first record only
        let mut headers = METRIC_HEADERS.to_vec();
        if drawdown {
            headers.push(DRAWDOWN_HEADER);
        }
        writer.write_record(&headers).map_err(|e| csv_error(path, e))?;
    }

    for summary in summaries {
        writer
            .serialize(MetricsRecord::new(summary, drawdown))
            .map_err(|e| csv_error(path, e))?;
    }

    writer.flush()?;
    tracing::info!(path = %path.display(), rows = summaries.len(), "metrics CSV written");
    Ok(())
}
