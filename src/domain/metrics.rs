//! Per-symbol risk/return summary statistics.

use crate::domain::ohlcv::PriceSeries;
use crate::ports::performance_port::PerformancePort;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Daily return dispersion at or below this fraction of `max(|mean|, 1)` is
/// floating-point residue from computing the returns, not real movement.
pub const VOLATILITY_NOISE_FLOOR: f64 = 1e-9;

/// A metric supplied by an optional secondary source.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionalMetric {
    /// No source was configured; the field is left out of reports.
    #[default]
    NotRequested,
    /// A source was configured but could not produce a value.
    Unavailable { reason: String },
    Value(f64),
}

impl OptionalMetric {
    pub fn value(&self) -> Option<f64> {
        match self {
            OptionalMetric::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_requested(&self) -> bool {
        !matches!(self, OptionalMetric::NotRequested)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub symbol: String,
    pub annualized_return: Option<f64>,
    pub annualized_volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub observations: usize,
    pub max_drawdown: OptionalMetric,
}

impl MetricsSummary {
    /// Summarize one series. `source`, when given, supplies max drawdown;
    /// its failure only affects that field.
    pub fn compute(series: &PriceSeries, source: Option<&dyn PerformancePort>) -> Self {
        let closes = series.closes();
        let returns = daily_returns(&closes);

        let annualized_return = returns.as_deref().and_then(annualized_return);
        let annualized_volatility = returns.as_deref().and_then(annualized_volatility);
        let sharpe_ratio = match (annualized_return, annualized_volatility) {
            (Some(ret), Some(vol)) if vol > 0.0 => Some(ret / vol),
            _ => None,
        };

        let max_drawdown = match source {
            None => OptionalMetric::NotRequested,
            Some(source) => match source.max_drawdown(&closes) {
                Ok(v) if v.is_finite() => OptionalMetric::Value(v),
                Ok(v) => OptionalMetric::Unavailable {
                    reason: format!("non-finite drawdown {}", v),
                },
                Err(e) => {
                    tracing::warn!(symbol = %series.symbol(), error = %e, "max drawdown unavailable");
                    OptionalMetric::Unavailable {
                        reason: e.to_string(),
                    }
                }
            },
        };

        MetricsSummary {
            symbol: series.symbol().to_string(),
            annualized_return,
            annualized_volatility,
            sharpe_ratio,
            observations: series.len(),
            max_drawdown,
        }
    }
}

/// Summary for one series without a secondary source.
pub fn compute_metrics(series: &PriceSeries) -> MetricsSummary {
    MetricsSummary::compute(series, None)
}

/// Simple returns C[t]/C[t-1] - 1.
///
/// `None` when there are fewer than two closes or any return is not finite
/// (a zero previous close), since every statistic downstream would be
/// meaningless.
fn daily_returns(closes: &[f64]) -> Option<Vec<f64>> {
    if closes.len() < 2 {
        return None;
    }
    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    returns.iter().all(|r| r.is_finite()).then_some(returns)
}

fn annualized_return(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    Some((1.0 + mean).powf(TRADING_DAYS_PER_YEAR) - 1.0)
}

/// Sample standard deviation of returns scaled by sqrt(252).
///
/// A constant return series comes out as exactly zero, so the Sharpe ratio
/// stays undefined for it.
fn annualized_volatility(returns: &[f64]) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let daily = variance.sqrt();
    if is_rounding_noise(daily, mean) {
        return Some(0.0);
    }
    Some(daily * TRADING_DAYS_PER_YEAR.sqrt())
}

fn is_rounding_noise(daily_std: f64, mean: f64) -> bool {
    daily_std <= VOLATILITY_NOISE_FLOOR * mean.abs().max(1.0)
}
