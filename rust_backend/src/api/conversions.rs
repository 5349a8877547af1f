//! Type conversions between internal models and API DTOs.
//!
//! ## Conversion Strategy
//!
//! - `From<&InternalType> for ApiType`: infallible conversion to API rows
//! - Minute offsets → `"HH:MM"` strings
//! - Strongly-typed IDs → String

use crate::api::types as api;
use crate::core::domain::{Categorized, Reservation, ReservationRecord, TimeSlot};
use crate::core::error::ParseError;
use crate::services::occupancy::CategoryAnalysis;
use crate::time::format_minutes;

// =========================================================
// Slots
// =========================================================

pub fn slot_row(category: &str, slot: &TimeSlot) -> api::SlotRow {
    api::SlotRow {
        category: category.to_string(),
        slot_time: slot.label(),
        overlap_count: slot.count,
        member_ids: slot.members.iter().map(|id| id.to_string()).collect(),
    }
}

impl From<&CategoryAnalysis> for api::CategoryReport {
    fn from(analysis: &CategoryAnalysis) -> Self {
        api::CategoryReport {
            category: analysis.category.clone(),
            summary: api::Summary {
                total: analysis.outcome.total(),
                valid: analysis.outcome.valid.len(),
                excluded: analysis.outcome.excluded.len(),
                max_overlap: analysis.summary.max_overlap,
                occupied_slot_count: analysis.summary.occupied_slot_count,
            },
            histogram: analysis.summary.histogram.clone(),
            slots: analysis
                .grid
                .slots()
                .iter()
                .map(|slot| slot_row(&analysis.category, slot))
                .collect(),
        }
    }
}

// =========================================================
// Reservations
// =========================================================

impl api::ReservationRow {
    /// Row for a parsed reservation.
    pub fn from_reservation(reservation: &Reservation, buffer: u32, valid: bool) -> Self {
        let (status, reason) = if valid {
            (api::ReservationStatus::Valid, None)
        } else {
            (
                api::ReservationStatus::Excluded,
                Some(api::ExclusionReason::OutsideWindow),
            )
        };

        api::ReservationRow {
            id: reservation.id().to_string(),
            category: reservation.category_key().to_string(),
            reservation_time: format_minutes(reservation.instant()),
            effective_window: Some(reservation.buffered_interval(buffer).to_clock_pair()),
            status,
            reason,
            error: None,
        }
    }

    /// Row for a record whose time text could not be parsed.
    pub fn malformed(record: &ReservationRecord, error: &ParseError) -> Self {
        api::ReservationRow {
            id: record.id.to_string(),
            category: record.category_key().to_string(),
            reservation_time: record.time_text.clone(),
            effective_window: None,
            status: api::ReservationStatus::Excluded,
            reason: Some(api::ExclusionReason::MalformedTime),
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_row_lists_members() {
        let mut slot = TimeSlot::new(3, 11 * 60 + 30);
        slot.count = 2;
        slot.members = vec!["a".into(), "b".into()];

        let row = slot_row("Hall", &slot);
        assert_eq!(row.slot_time, "11:30");
        assert_eq!(row.overlap_count, 2);
        assert_eq!(row.member_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_reservation_row_effective_window() {
        let reservation = Reservation::new("7", None, 8 * 60 + 15);
        let row = api::ReservationRow::from_reservation(&reservation, 30, true);

        assert_eq!(row.category, "default");
        assert_eq!(row.reservation_time, "08:15");
        assert_eq!(
            row.effective_window,
            Some(["07:45".to_string(), "08:45".to_string()])
        );
        assert_eq!(row.reason, None);
    }

    #[test]
    fn test_malformed_row_keeps_raw_text() {
        let record = ReservationRecord::new("x", Some("Hall".into()), "noon");
        let err = record.parse().unwrap_err();
        let row = api::ReservationRow::malformed(&record, &err);

        assert_eq!(row.reservation_time, "noon");
        assert_eq!(row.effective_window, None);
        assert_eq!(row.reason, Some(api::ExclusionReason::MalformedTime));
        assert!(row.error.is_some());
    }
}
