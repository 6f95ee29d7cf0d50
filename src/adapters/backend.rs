//! Indicator backend selection.
//!
//! The backend is resolved once, before any series is processed; everything
//! downstream only sees `&dyn IndicatorPort`.

use crate::domain::error::PricelensError;
use crate::domain::indicator::{BackendKind, RecurrenceBackend};
use crate::ports::indicator_port::IndicatorPort;

/// Whether the native backend was compiled into this build.
pub fn native_available() -> bool {
    cfg!(feature = "native")
}

fn native_backend() -> Option<Box<dyn IndicatorPort>> {
    #[cfg(feature = "native")]
    {
        Some(Box::new(crate::adapters::ta_backend::TaBackend))
    }

    #[cfg(not(feature = "native"))]
    {
        None
    }
}

pub fn select_backend(kind: BackendKind) -> Result<Box<dyn IndicatorPort>, PricelensError> {
    let backend: Box<dyn IndicatorPort> = match kind {
        BackendKind::Recurrence => Box::new(RecurrenceBackend),
        BackendKind::Native => native_backend().ok_or_else(|| PricelensError::BackendUnavailable {
            name: kind.to_string(),
        })?,
        BackendKind::Auto => native_backend().unwrap_or_else(|| Box::new(RecurrenceBackend)),
    };
    tracing::info!(requested = %kind, selected = backend.name(), "indicator backend");
    Ok(backend)
}
