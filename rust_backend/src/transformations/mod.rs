//! Record scoping and grouping ahead of analysis.
//!
//! - [`filtering`]: Category filter supplied by the caller ("all" or one label)
//! - [`grouping`]: Partitioning into per-category groups

pub mod filtering;
pub mod grouping;

pub use filtering::CategoryFilter;
pub use grouping::{partition, partition_by_category, CategoryGroup};
