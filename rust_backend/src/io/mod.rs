//! High-level data loading and export utilities.
//!
//! Loaders combine parsing with format detection and error context. Exporters
//! turn a finished report into CSV tables and JSON.
//!
//! # Example
//!
//! ```no_run
//! use occupancy_rust::io::loaders::ReservationLoader;
//! use std::path::Path;
//!
//! let result = ReservationLoader::load_from_file(Path::new("reservations.csv"))
//!     .expect("Failed to load");
//! println!("Loaded {} reservations", result.num_records);
//! ```

pub mod export;
pub mod loaders;


pub use export::{report_json, reservations_csv, slots_csv, write_exports};
pub use loaders::{load_config, ReservationLoadResult, ReservationLoader, ReservationSourceType};
