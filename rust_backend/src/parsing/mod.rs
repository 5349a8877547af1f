//! Parsers for reservation input tables.
//!
//! - [`csv_parser`]: Delimited text (CSV/TSV) with `id`, `time` and an optional
//!   `category`/`location` column
//!
//! # Example
//!
//! ```
//! use occupancy_rust::parsing::csv_parser::parse_reservations_csv;
//!
//! let records = parse_reservations_csv(b"id,time\n1,08:00\n").unwrap();
//! assert_eq!(records.len(), 1);
//! ```

pub mod csv_parser;

pub use csv_parser::{
    dataframe_to_records, ensure_unique_ids, parse_reservations_csv,
    parse_reservations_csv_file, parse_reservations_delimited,
};
