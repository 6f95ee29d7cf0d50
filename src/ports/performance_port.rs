//! Secondary performance-metrics source.

use crate::domain::error::PricelensError;

/// Supplies metrics beyond the core return/volatility set.
///
/// Failures are expected and are degraded by the caller to an unavailable
/// field; they never abort the primary metrics.
pub trait PerformancePort: Send + Sync {
    fn max_drawdown(&self, closes: &[f64]) -> Result<f64, PricelensError>;
}
