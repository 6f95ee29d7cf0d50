//! OHLCV bar and per-symbol price series.

use crate::domain::error::PricelensError;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Daily bars for exactly one symbol, strictly ascending by date.
///
/// Both the indicator engine and the metrics aggregator borrow a series
/// read-only; neither re-checks the ordering, so construction through
/// [`PriceSeries::new`] is where the invariant is enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Build a series, rejecting out-of-order or duplicate dates.
    pub fn new(symbol: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, PricelensError> {
        let symbol = symbol.into();
        for pair in bars.windows(2) {
            let (prev, next) = (pair[0].date, pair[1].date);
            if next == prev {
                return Err(PricelensError::DuplicateDate { symbol, date: next });
            }
            if next < prev {
                return Err(PricelensError::UnorderedDates {
                    symbol,
                    previous: prev,
                    next,
                });
            }
        }
        Ok(Self { symbol, bars })
    }

    /// Build a series from bars the caller already guarantees are ordered.
    pub fn from_sorted(symbol: impl Into<String>, bars: Vec<OhlcvBar>) -> Self {
        debug_assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|b| b.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|b| b.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(date: &str, close: f64) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn new_accepts_ascending_dates() {
        let series = PriceSeries::new(
            "AAPL",
            vec![bar("2024-01-02", 10.0), bar("2024-01-03", 11.0)],
        )
        .unwrap();
        assert_eq!(series.symbol(), "AAPL");
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 11.0]);
        assert_eq!(
            series.first_date(),
            NaiveDate::from_ymd_opt(2024, 1, 2)
        );
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
    }

    #[test]
    fn new_rejects_duplicate_dates() {
        let err = PriceSeries::new(
            "AAPL",
            vec![bar("2024-01-02", 10.0), bar("2024-01-02", 11.0)],
        )
        .unwrap_err();
        assert!(matches!(err, PricelensError::DuplicateDate { .. }));
    }

    #[test]
    fn new_rejects_descending_dates() {
        let err = PriceSeries::new(
            "AAPL",
            vec![bar("2024-01-03", 10.0), bar("2024-01-02", 11.0)],
        )
        .unwrap_err();
        assert!(matches!(err, PricelensError::UnorderedDates { .. }));
    }

    #[test]
    fn empty_series_is_valid() {
        let series = PriceSeries::new("EMPTY", vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
    }
}
