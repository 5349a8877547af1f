//! Domain models for reservations, buffered intervals and time slots.
//!
//! All instants are integer minute offsets from midnight. There is no calendar
//! date: an interval may start before `0` or end after `1440` when a buffer
//! pushes it across midnight, and such values are kept as-is for arithmetic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{AnalysisError, AnalysisResult, ParseError};
use crate::time::clock::{format_minutes, parse_clock_time};

/// Minutes in a day; upper bound for operating windows.
pub const MINUTES_PER_DAY: i32 = 24 * 60;

/// Half-width of the buffered interval around each reservation.
pub const DEFAULT_BUFFER_MINUTES: u32 = 30;

/// Spacing between consecutive slot start instants.
pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u32 = 10;

/// Category used for reservations that carry no grouping label.
///
/// Reserved: records explicitly labelled `default` share this category with
/// unlabelled ones.
pub const DEFAULT_CATEGORY: &str = "default";

/// Unique identifier of a reservation.
///
/// Ids arrive as either integers or strings in the ingested table, so they
/// are normalized to their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(pub String);

impl ReservationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ReservationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ReservationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for ReservationId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Anything that can be routed to a category partition.
pub trait Categorized {
    /// Grouping label, `None` when the record carries no category.
    fn category(&self) -> Option<&str>;

    /// Label used for partitioning; falls back to [`DEFAULT_CATEGORY`].
    fn category_key(&self) -> &str {
        self.category().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// A reservation with an already-parsed instant.
///
/// Immutable once constructed. The instant is a minute offset from midnight.
///
/// # Examples
///
/// ```
/// use occupancy_rust::core::domain::Reservation;
///
/// let r = Reservation::from_clock_time("42", Some("Room A".to_string()), "12:00").unwrap();
/// assert_eq!(r.instant(), 720);
///
/// let interval = r.buffered_interval(30);
/// assert_eq!((interval.start, interval.end), (690, 750));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    category: Option<String>,
    instant: i32,
}

impl Reservation {
    pub fn new(id: impl Into<ReservationId>, category: Option<String>, instant: i32) -> Self {
        Self {
            id: id.into(),
            category,
            instant,
        }
    }

    /// Builds a reservation from `HH:MM` text, failing on malformed input.
    pub fn from_clock_time(
        id: impl Into<ReservationId>,
        category: Option<String>,
        text: &str,
    ) -> Result<Self, ParseError> {
        let instant = parse_clock_time(text)?;
        Ok(Self::new(id, category, instant))
    }

    pub fn id(&self) -> &ReservationId {
        &self.id
    }

    pub fn instant(&self) -> i32 {
        self.instant
    }

    /// `[instant - buffer, instant + buffer)`, saturating at the `i32` range.
    pub fn buffered_interval(&self, buffer: u32) -> BufferedInterval {
        let buffer = i32::try_from(buffer).unwrap_or(i32::MAX);
        BufferedInterval {
            start: self.instant.saturating_sub(buffer),
            end: self.instant.saturating_add(buffer),
        }
    }
}

impl Categorized for Reservation {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// A reservation exactly as ingested, before its time text is parsed.
///
/// Parsing is deferred so that a malformed time excludes only its own record
/// rather than failing the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: ReservationId,
    pub category: Option<String>,
    pub time_text: String,
}

impl ReservationRecord {
    pub fn new(
        id: impl Into<ReservationId>,
        category: Option<String>,
        time_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            time_text: time_text.into(),
        }
    }

    pub fn parse(&self) -> Result<Reservation, ParseError> {
        Reservation::from_clock_time(self.id.clone(), self.category.clone(), &self.time_text)
    }
}

impl Categorized for ReservationRecord {
    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Half-open occupancy interval `[start, end)` derived from a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferedInterval {
    pub start: i32,
    pub end: i32,
}

impl BufferedInterval {
    #[inline]
    pub fn contains(&self, minute: i32) -> bool {
        self.start <= minute && minute < self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Standard half-open overlap test against the operating window.
    #[inline]
    pub fn intersects(&self, window: &OperatingWindow) -> bool {
        self.end > window.start() && self.start < window.end()
    }

    /// `["HH:MM", "HH:MM"]`, wrapped onto the clock face.
    pub fn to_clock_pair(&self) -> [String; 2] {
        [format_minutes(self.start), format_minutes(self.end)]
    }
}

/// The bounded range `[start, end)` in which occupancy is evaluated.
///
/// Construction enforces `start < end`, so a window that exists is always
/// usable by the validator and the slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OperatingWindow {
    start: i32,
    end: i32,
}

impl OperatingWindow {
    pub fn new(start: i32, end: i32) -> AnalysisResult<Self> {
        if start >= end {
            return Err(AnalysisError::configuration(format!(
                "operating window start ({}) must be before end ({})",
                format_minutes(start),
                format_minutes(end)
            )));
        }
        if start < 0 || end > MINUTES_PER_DAY {
            return Err(AnalysisError::configuration(format!(
                "operating window [{}, {}) must lie within one day",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Window spanning whole hours, `start_hour` in `0..24`, `end_hour` in `1..=24`.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> AnalysisResult<Self> {
        if start_hour >= end_hour {
            return Err(AnalysisError::configuration(format!(
                "start_hour ({}) must be less than end_hour ({})",
                start_hour, end_hour
            )));
        }
        if end_hour > 24 {
            return Err(AnalysisError::configuration(format!(
                "end_hour ({}) must be at most 24",
                end_hour
            )));
        }
        Self::new(start_hour as i32 * 60, end_hour as i32 * 60)
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn duration_minutes(&self) -> i32 {
        self.end - self.start
    }

    pub fn contains(&self, minute: i32) -> bool {
        self.start <= minute && minute < self.end
    }

    /// `["HH:MM", "HH:MM"]`; an end at midnight renders as `24:00`.
    pub fn to_clock_pair(&self) -> [String; 2] {
        // 24:00 is a valid exclusive end and would otherwise wrap to 00:00
        let end = if self.end == MINUTES_PER_DAY {
            "24:00".to_string()
        } else {
            format_minutes(self.end)
        };
        [format_minutes(self.start), end]
    }
}

impl fmt::Display for OperatingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [start, end] = self.to_clock_pair();
        write!(f, "{}-{}", start, end)
    }
}

/// One discrete measurement point of the slot grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    pub index: usize,
    pub start: i32,
    pub count: u32,
    pub members: Vec<ReservationId>,
}

impl TimeSlot {
    pub fn new(index: usize, start: i32) -> Self {
        Self {
            index,
            start,
            count: 0,
            members: Vec::new(),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.count > 0
    }

    pub fn label(&self) -> String {
        format_minutes(self.start)
    }
}
