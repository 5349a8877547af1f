//! Reservation occupancy and overlap analysis.
//!
//! Reservations are single instants widened by a symmetric buffer. The
//! engine counts, for every slot of a fixed grid over an operating window,
//! how many buffered reservations cover the slot start, independently per
//! category.
//!
//! ```
//! use occupancy_rust::config::AnalysisConfig;
//! use occupancy_rust::core::ReservationRecord;
//! use occupancy_rust::preprocessing::analyze_records;
//!
//! let records = vec![
//!     ReservationRecord::new("1", None, "12:00"),
//!     ReservationRecord::new("2", None, "12:15"),
//! ];
//! let report = analyze_records(records, &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.summary.max_overlap, 2);
//! ```

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod algorithms;
pub mod api;
pub mod config;
pub mod core;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod time;
pub mod transformations;

/// Occupancy analysis backend for the Streamlit front end
#[cfg(feature = "python")]
#[pymodule]
fn occupancy_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    api::register_api_functions(m)?;
    Ok(())
}
