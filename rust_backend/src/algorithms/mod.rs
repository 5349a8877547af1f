//! Occupancy algorithms and slot statistics.
//!
//! # Components
//!
//! - [`slots`]: Slot grid construction over an operating window
//! - [`occupancy`]: Assignment of buffered intervals to slots (naive and sweep-line)
//! - [`analysis`]: Maximum overlap, occupied-slot count and overlap histogram
//!
//! # Example
//!
//! ```
//! use occupancy_rust::algorithms::{summarize, OccupancyEngine, SlotGrid};
//! use occupancy_rust::core::domain::{OperatingWindow, Reservation};
//!
//! let window = OperatingWindow::from_hours(8, 18).unwrap();
//! let grid = SlotGrid::build(&window, 10).unwrap();
//! let valid = vec![Reservation::new("1", None, 720), Reservation::new("2", None, 730)];
//!
//! let grid = OccupancyEngine::default().compute(&valid, grid);
//! let summary = summarize(grid.slots());
//! assert_eq!(summary.max_overlap, 2);
//! ```

pub mod analysis;
pub mod occupancy;
pub mod slots;

pub use analysis::{summarize, OccupancySummary, OverlapHistogram};
pub use occupancy::{OccupancyEngine, OccupancyStrategy};
pub use slots::SlotGrid;
