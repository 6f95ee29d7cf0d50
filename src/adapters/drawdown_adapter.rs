//! Maximum drawdown as a secondary performance source.

use crate::domain::error::PricelensError;
use crate::ports::performance_port::PerformancePort;

#[derive(Debug, Clone, Copy, Default)]
pub struct DrawdownAdapter;

impl PerformancePort for DrawdownAdapter {
    /// Largest peak-to-trough decline of the close series, as a positive
    /// fraction of the peak.
    fn max_drawdown(&self, closes: &[f64]) -> Result<f64, PricelensError> {
        let Some(&first) = closes.first() else {
            return Err(PricelensError::Metric {
                reason: "max drawdown needs at least one close".into(),
            });
        };

        let mut peak = first;
        let mut max_dd = 0.0_f64;

        for &close in closes {
            if close > peak {
                peak = close;
            }
            if peak <= 0.0 {
                return Err(PricelensError::Metric {
                    reason: format!("non-positive peak {} in close series", peak),
                });
            }
            let dd = (peak - close) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }

        Ok(max_dd)
    }
}
