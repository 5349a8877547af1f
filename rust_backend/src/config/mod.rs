//! Analysis configuration.
//!
//! Recognized options: operating window hours, buffer minutes, slot
//! granularity, category filter and occupancy strategy.

pub mod analysis_config;

pub use analysis_config::{AnalysisConfig, AnalysisParams, AnalysisSettings, WindowSettings};
