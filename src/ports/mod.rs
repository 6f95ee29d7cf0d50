//! Port traits: the seams between the engine and everything around it.

pub mod config_port;
pub mod data_port;
pub mod indicator_port;
pub mod performance_port;
pub mod report_port;
