//! Per-symbol analysis: indicators plus metrics for each loaded series.

use crate::domain::indicator::{IndicatorRow, compute_indicators_with};
use crate::domain::metrics::MetricsSummary;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::indicator_port::IndicatorPort;
use crate::ports::performance_port::PerformancePort;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub series: PriceSeries,
    pub rows: Vec<IndicatorRow>,
    pub metrics: MetricsSummary,
}

impl SymbolAnalysis {
    pub fn symbol(&self) -> &str {
        self.series.symbol()
    }
}

pub fn analyze_series(
    series: PriceSeries,
    backend: &dyn IndicatorPort,
    source: Option<&dyn PerformancePort>,
) -> SymbolAnalysis {
    let rows = compute_indicators_with(&series, backend);
    let metrics = MetricsSummary::compute(&series, source);
    tracing::debug!(
        symbol = %series.symbol(),
        rows = rows.len(),
        backend = backend.name(),
        "analyzed series"
    );
    SymbolAnalysis {
        series,
        rows,
        metrics,
    }
}

/// Analyze every series in parallel, one task per symbol.
///
/// Symbols share nothing mutable, so results are independent of
/// scheduling; the output is sorted by symbol.
pub fn analyze_universe(
    universe: Vec<PriceSeries>,
    backend: &dyn IndicatorPort,
    source: Option<&dyn PerformancePort>,
) -> Vec<SymbolAnalysis> {
    let mut analyses: Vec<SymbolAnalysis> = universe
        .into_par_iter()
        .map(|series| analyze_series(series, backend, source))
        .collect();
    analyses.sort_by(|a, b| a.symbol().cmp(b.symbol()));
    analyses
}

/// Total bar count across all analyzed symbols.
pub fn total_rows(analyses: &[SymbolAnalysis]) -> usize {
    analyses.iter().map(|a| a.series.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::RecurrenceBackend;
    use crate::domain::ohlcv::OhlcvBar;
    use chrono::NaiveDate;

    fn make_series(symbol: &str, count: usize, start_price: f64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = (0..count)
            .map(|i| {
                let close = start_price + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1;
                OhlcvBar {
                    date: start + chrono::Duration::days(i as i64),
                    open: close,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 10_000,
                }
            })
            .collect();
        PriceSeries::from_sorted(symbol, bars)
    }

    #[test]
    fn analyze_series_pairs_rows_and_metrics() {
        let analysis = analyze_series(make_series("AAA", 40, 50.0), &RecurrenceBackend, None);

        assert_eq!(analysis.symbol(), "AAA");
        assert_eq!(analysis.rows.len(), 40);
        assert_eq!(analysis.metrics.observations, 40);
        assert_eq!(analysis.metrics.symbol, "AAA");
    }

    #[test]
    fn analyze_universe_sorted_by_symbol() {
        let universe = vec![
            make_series("MSFT", 30, 300.0),
            make_series("AAPL", 25, 180.0),
            make_series("GOOG", 35, 140.0),
        ];
        let analyses = analyze_universe(universe, &RecurrenceBackend, None);

        let symbols: Vec<&str> = analyses.iter().map(|a| a.symbol()).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOG", "MSFT"]);
        assert_eq!(total_rows(&analyses), 90);
    }

    #[test]
    fn analyze_universe_matches_sequential() {
        let universe: Vec<PriceSeries> = (0..8)
            .map(|i| make_series(&format!("S{}", i), 50 + i, 20.0 + i as f64))
            .collect();

        let parallel = analyze_universe(universe.clone(), &RecurrenceBackend, None);
        for (analysis, series) in parallel.iter().zip(universe) {
            let sequential = analyze_series(series, &RecurrenceBackend, None);
            assert_eq!(analysis.rows, sequential.rows);
            assert_eq!(analysis.metrics, sequential.metrics);
        }
    }

    #[test]
    fn analyze_universe_empty() {
        assert!(analyze_universe(vec![], &RecurrenceBackend, None).is_empty());
    }
}
