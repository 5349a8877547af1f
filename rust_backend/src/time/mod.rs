//! Time-of-day conversions between `HH:MM` text and minute offsets.

pub mod clock;

pub use clock::{format_minutes, parse_clock_time};
