use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::domain::TimeSlot;

/// Overlap count (> 0) → number of slots exhibiting exactly that count.
pub type OverlapHistogram = BTreeMap<u32, usize>;

/// Slot-level summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub max_overlap: u32,
    pub occupied_slot_count: usize,
    pub histogram: OverlapHistogram,
}

/// Compute summary statistics over a run of slots
///
/// # Arguments
/// * `slots` - Slots after occupancy assignment
///
/// # Returns
/// OccupancySummary; `max_overlap` is 0 for an empty or unoccupied grid
pub fn summarize(slots: &[TimeSlot]) -> OccupancySummary {
    let mut summary = OccupancySummary::default();

    for slot in slots.iter().filter(|s| s.count > 0) {
        summary.max_overlap = summary.max_overlap.max(slot.count);
        summary.occupied_slot_count += 1;
        *summary.histogram.entry(slot.count).or_insert(0) += 1;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize, count: u32) -> TimeSlot {
        let mut s = TimeSlot::new(index, index as i32 * 10);
        s.count = count;
        s
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, OccupancySummary::default());
    }

    #[test]
    fn test_summarize_all_zero() {
        let slots: Vec<TimeSlot> = (0..6).map(|i| slot(i, 0)).collect();
        let summary = summarize(&slots);
        assert_eq!(summary.max_overlap, 0);
        assert_eq!(summary.occupied_slot_count, 0);
        assert!(summary.histogram.is_empty());
    }

    #[test]
    fn test_summarize_mixed_counts() {
        let counts = [0, 1, 3, 3, 2, 0, 1];
        let slots: Vec<TimeSlot> = counts.iter().enumerate().map(|(i, &c)| slot(i, c)).collect();
        let summary = summarize(&slots);

        assert_eq!(summary.max_overlap, 3);
        assert_eq!(summary.occupied_slot_count, 5);
        assert_eq!(
            summary.histogram,
            BTreeMap::from([(1, 2), (2, 1), (3, 2)])
        );
    }
}
