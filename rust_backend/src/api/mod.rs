//! # API Module
//!
//! Presentation-facing layer. It isolates the Python bindings (PyO3) from the
//! internal analysis types.
//!
//! ## Architecture
//!
//! - [`types`]: serializable DTOs (primitives only)
//! - [`conversions`]: conversion layer between internal results and DTOs
//! - `streamlit`: `#[pyfunction]` exports, built with the `python` feature
//!
//! ## Design Principles
//!
//! 1. **Isolation**: PyO3 dependencies only in this module
//! 2. **Conversion**: minute offsets → `"HH:MM"` strings at the boundary
//! 3. **Simplicity**: DTOs mirror what the front end displays

pub mod conversions;
#[cfg(feature = "python")]
pub mod streamlit;
pub mod types;

#[cfg(feature = "python")]
pub use streamlit::register_api_functions;
pub use types::*;
