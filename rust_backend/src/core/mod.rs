//! Core domain models for reservation occupancy analysis.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing reservations, their buffered intervals, the operating window and
//! the discrete time slots occupancy is measured on.

pub mod domain;
pub mod error;

pub use domain::{
    BufferedInterval, Categorized, OperatingWindow, Reservation, ReservationId,
    ReservationRecord, TimeSlot,
};
pub use error::{AnalysisError, AnalysisResult, ParseError};
