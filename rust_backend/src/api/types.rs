//! Presentation-facing Data Transfer Objects (DTOs).
//!
//! These types form the output contract consumed by the presentation layer.
//! They use only primitives (String, u32, Vec, BTreeMap) so they serialize
//! cleanly to JSON for the Streamlit front end and to flat CSV for export.
//!
//! ## Design Guidelines
//!
//! 1. **Primitives Only**: clock times as `"HH:MM"` strings, ids as strings
//! 2. **Flat Structures**: one row type per exported table
//! 3. **Serializable**: every type round-trips through serde

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =========================================================
// Row Types
// =========================================================

/// Whether a reservation took part in occupancy counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Valid,
    Excluded,
}

/// Why a reservation was excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Buffered interval does not intersect the operating window
    OutsideWindow,
    /// Time text could not be parsed
    MalformedTime,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Valid => "valid",
            ReservationStatus::Excluded => "excluded",
        }
    }
}

impl ExclusionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExclusionReason::OutsideWindow => "outside_window",
            ExclusionReason::MalformedTime => "malformed_time",
        }
    }
}

/// One slot of one category's grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRow {
    pub category: String,
    pub slot_time: String,
    pub overlap_count: u32,
    pub member_ids: Vec<String>,
}

/// One ingested reservation and its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRow {
    pub id: String,
    pub category: String,
    /// Parsed `HH:MM`, or the raw text when it could not be parsed
    pub reservation_time: String,
    /// `None` when the time could not be parsed
    pub effective_window: Option<[String; 2]>,
    pub status: ReservationStatus,
    pub reason: Option<ExclusionReason>,
    /// Parse failure message for malformed times
    pub error: Option<String>,
}

// =========================================================
// Summaries
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub excluded: usize,
    pub max_overlap: u32,
    pub occupied_slot_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: String,
    pub summary: Summary,
    /// Overlap count → number of slots with exactly that count
    pub histogram: BTreeMap<u32, usize>,
    /// Every slot of the grid, occupied or not, in time order
    pub slots: Vec<SlotRow>,
}

impl CategoryReport {
    pub fn occupied_slots(&self) -> impl Iterator<Item = &SlotRow> {
        self.slots.iter().filter(|s| s.overlap_count > 0)
    }
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: Summary,
    /// Per-category results, in first-occurrence order
    pub categories: Vec<CategoryReport>,
    /// Every in-scope record, in input order
    pub reservations: Vec<ReservationRow>,
    pub operating_window: [String; 2],
    pub buffer_minutes: u32,
    pub slot_granularity_minutes: u32,
    /// SHA-256 of the records and parameters that produced this report
    pub input_checksum: String,
}

impl AnalysisReport {
    pub fn category(&self, name: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == name)
    }

    /// Categories ordered by reservation count, largest first.
    ///
    /// Ties keep first-occurrence order.
    pub fn categories_by_size(&self) -> Vec<&CategoryReport> {
        let mut ordered: Vec<&CategoryReport> = self.categories.iter().collect();
        ordered.sort_by(|a, b| b.summary.total.cmp(&a.summary.total));
        ordered
    }

    /// Occupied slot rows across every category, for export.
    pub fn occupied_slot_rows(&self) -> impl Iterator<Item = &SlotRow> {
        self.categories.iter().flat_map(|c| c.occupied_slots())
    }

    pub fn is_grouped(&self) -> bool {
        self.categories.len() > 1
    }
}
