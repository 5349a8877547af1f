//! Service layer for analysis orchestration.
//!
//! Services sit between ingestion and the presentation bindings. They run the
//! per-category analysis, compute input checksums and memoize finished
//! reports.

pub mod cache;
pub mod checksum;
pub mod occupancy;

pub use cache::AnalysisCache;
pub use checksum::input_checksum;
pub use occupancy::{analyze_grouped, analyze_partition, CategoryAnalysis, GroupedAnalysis};
