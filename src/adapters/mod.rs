//! Concrete adapter implementations for ports.

pub mod backend;
pub mod csv_adapter;
pub mod drawdown_adapter;
pub mod file_config_adapter;
pub mod summary_report;
pub mod svg_chart;
#[cfg(feature = "native")]
pub mod ta_backend;
