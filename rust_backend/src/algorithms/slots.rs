//! Slot grid construction.
//!
//! A grid is an ordered run of [`TimeSlot`]s at `window.start`,
//! `window.start + granularity`, ... up to but excluding `window.end`.
//! Grids are built fresh for every run and never reused.

use serde::Serialize;

use crate::core::domain::{
    OperatingWindow, TimeSlot, DEFAULT_SLOT_GRANULARITY_MINUTES, MINUTES_PER_DAY,
};
use crate::core::error::{AnalysisError, AnalysisResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotGrid {
    window: OperatingWindow,
    granularity: u32,
    slots: Vec<TimeSlot>,
}

impl SlotGrid {
    /// Build an empty grid covering `[window.start, window.end)`.
    ///
    /// A non-divisible window leaves a shorter final slot; its start instant
    /// is still inside the window.
    pub fn build(window: &OperatingWindow, granularity: u32) -> AnalysisResult<Self> {
        if granularity == 0 || granularity > MINUTES_PER_DAY as u32 {
            return Err(AnalysisError::configuration(format!(
                "slot granularity must be between 1 and {} minutes, got {}",
                MINUTES_PER_DAY, granularity
            )));
        }

        Ok(Self {
            window: *window,
            granularity,
            slots: layout(window, granularity),
        })
    }

    pub fn with_default_granularity(window: &OperatingWindow) -> Self {
        Self {
            window: *window,
            granularity: DEFAULT_SLOT_GRANULARITY_MINUTES,
            slots: layout(window, DEFAULT_SLOT_GRANULARITY_MINUTES),
        }
    }

    pub fn window(&self) -> &OperatingWindow {
        &self.window
    }

    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [TimeSlot] {
        &mut self.slots
    }

    pub fn into_slots(self) -> Vec<TimeSlot> {
        self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn occupied(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(|s| s.is_occupied())
    }

    /// Sum of all slot counts.
    pub fn total_count(&self) -> u64 {
        self.slots.iter().map(|s| s.count as u64).sum()
    }
}

fn layout(window: &OperatingWindow, granularity: u32) -> Vec<TimeSlot> {
    let step = granularity as i32;
    let num_slots = ((window.duration_minutes() + step - 1) / step) as usize;

    (0..num_slots)
        .map(|i| TimeSlot::new(i, window.start() + i as i32 * step))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_business_hours() {
        let window = OperatingWindow::from_hours(8, 18).unwrap();
        let grid = SlotGrid::build(&window, 10).unwrap();

        assert_eq!(grid.len(), 60);
        assert_eq!(grid.slots()[0].start, 8 * 60);
        assert_eq!(grid.slots()[59].start, 17 * 60 + 50);
        assert!(grid.slots().iter().all(|s| s.count == 0 && s.members.is_empty()));
        assert!(grid
            .slots()
            .iter()
            .enumerate()
            .all(|(i, s)| s.index == i));
    }

    #[test]
    fn test_build_non_divisible_window() {
        let window = OperatingWindow::new(0, 25).unwrap();
        let grid = SlotGrid::build(&window, 10).unwrap();
        let starts: Vec<i32> = grid.slots().iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![0, 10, 20]);
    }

    #[test]
    fn test_build_rejects_zero_granularity() {
        let window = OperatingWindow::from_hours(8, 18).unwrap();
        assert!(matches!(
            SlotGrid::build(&window, 0),
            Err(AnalysisError::Configuration(_))
        ));
    }

    #[test]
    fn test_default_granularity_matches_explicit() {
        let window = OperatingWindow::from_hours(0, 24).unwrap();
        assert_eq!(
            SlotGrid::with_default_granularity(&window),
            SlotGrid::build(&window, 10).unwrap()
        );
    }
}
