//! Price data access port trait.

use crate::domain::error::PricelensError;
use crate::domain::ohlcv::PriceSeries;

/// Source of per-symbol price histories.
///
/// Implementations must hand back series that already satisfy the
/// ascending, no-duplicate date invariant; the engine does not re-check it.
pub trait DataPort {
    fn list_symbols(&self) -> Result<Vec<String>, PricelensError>;

    fn load_series(&self, symbol: &str) -> Result<PriceSeries, PricelensError>;
}
