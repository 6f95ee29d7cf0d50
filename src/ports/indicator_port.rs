//! Indicator backend port trait.

use crate::domain::indicator::MacdSeries;

/// One implementation of the indicator set.
///
/// Every method returns a column index-aligned to `closes`. Implementations
/// must agree with the recurrence backend within floating-point tolerance,
/// so callers never need to know which one ran.
pub trait IndicatorPort: Send + Sync {
    fn name(&self) -> &'static str;

    fn sma(&self, closes: &[f64], period: usize) -> Vec<Option<f64>>;

    fn ema(&self, closes: &[f64], period: usize) -> Vec<Option<f64>>;

    fn rsi(&self, closes: &[f64], period: usize) -> Vec<Option<f64>>;

    fn macd(&self, closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries;
}
