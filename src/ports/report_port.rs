//! Chart output port trait.

use crate::domain::analysis::SymbolAnalysis;
use crate::domain::error::PricelensError;
use std::path::PathBuf;

/// Port for rendering one symbol's indicators.
pub trait ReportPort {
    /// Returns the path written, or `None` when there was nothing to draw.
    fn write_chart(&self, analysis: &SymbolAnalysis) -> Result<Option<PathBuf>, PricelensError>;

    /// Default implementation: writes each chart in turn, stopping at the first error.
    fn write_all(&self, analyses: &[SymbolAnalysis]) -> Result<Vec<PathBuf>, PricelensError> {
        let mut written = Vec::new();
        for analysis in analyses {
            if let Some(path) = self.write_chart(analysis)? {
                written.push(path);
            }
        }
        Ok(written)
    }
}
