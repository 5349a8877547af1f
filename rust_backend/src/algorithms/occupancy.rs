//! Slot occupancy assignment.
//!
//! Each valid reservation covers every slot whose start instant lies inside
//! its buffered interval. Two interchangeable strategies are provided:
//!
//! - [`OccupancyStrategy::Naive`]: checks every reservation against every
//!   slot, O(R·S).
//! - [`OccupancyStrategy::SweepLine`]: sorts interval boundaries and walks the
//!   grid once with a running active set, O((R + S) log R) plus output size.
//!
//! Both produce identical counts and identical member order (input order).

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithms::slots::SlotGrid;
use crate::core::domain::{Reservation, TimeSlot, DEFAULT_BUFFER_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OccupancyStrategy {
    Naive,
    #[default]
    SweepLine,
}

impl FromStr for OccupancyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "naive" => Ok(OccupancyStrategy::Naive),
            "sweep-line" | "sweep_line" | "sweep" => Ok(OccupancyStrategy::SweepLine),
            other => Err(format!(
                "Invalid occupancy strategy: {}. Must be 'naive' or 'sweep-line'",
                other
            )),
        }
    }
}

impl fmt::Display for OccupancyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OccupancyStrategy::Naive => f.write_str("naive"),
            OccupancyStrategy::SweepLine => f.write_str("sweep-line"),
        }
    }
}

/// Assigns valid reservations to the slots they occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyEngine {
    buffer: u32,
    strategy: OccupancyStrategy,
}

impl Default for OccupancyEngine {
    fn default() -> Self {
        Self {
            buffer: DEFAULT_BUFFER_MINUTES,
            strategy: OccupancyStrategy::default(),
        }
    }
}

impl OccupancyEngine {
    pub fn new(buffer: u32, strategy: OccupancyStrategy) -> Self {
        Self { buffer, strategy }
    }

    pub fn buffer(&self) -> u32 {
        self.buffer
    }

    pub fn strategy(&self) -> OccupancyStrategy {
        self.strategy
    }

    /// Accumulate counts and members of `valid` reservations into `grid`.
    ///
    /// Expects a freshly built grid; counts are added to whatever the slots
    /// already hold.
    pub fn compute(&self, valid: &[Reservation], mut grid: SlotGrid) -> SlotGrid {
        match self.strategy {
            OccupancyStrategy::Naive => assign_naive(valid, grid.slots_mut(), self.buffer),
            OccupancyStrategy::SweepLine => assign_sweep(valid, grid.slots_mut(), self.buffer),
        }
        grid
    }
}

fn assign_naive(valid: &[Reservation], slots: &mut [TimeSlot], buffer: u32) {
    for reservation in valid {
        let interval = reservation.buffered_interval(buffer);
        for slot in slots.iter_mut() {
            if interval.contains(slot.start) {
                slot.count += 1;
                slot.members.push(reservation.id().clone());
            }
        }
    }
}

// Ends sort before starts at equal instants. Either order gives the same
// active set at each query since both are applied before the slot is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    End,
    Start,
}

fn assign_sweep(valid: &[Reservation], slots: &mut [TimeSlot], buffer: u32) {
    let mut events: Vec<(i32, Boundary, usize)> = Vec::with_capacity(valid.len() * 2);
    for (position, reservation) in valid.iter().enumerate() {
        let interval = reservation.buffered_interval(buffer);
        if interval.is_empty() {
            continue;
        }
        events.push((interval.start, Boundary::Start, position));
        events.push((interval.end, Boundary::End, position));
    }
    events.sort_unstable();

    // Keyed by input position so members come out in input order
    let mut active: BTreeSet<usize> = BTreeSet::new();
    let mut cursor = 0;

    for slot in slots.iter_mut() {
        while let Some(&(at, boundary, position)) = events.get(cursor) {
            if at > slot.start {
                break;
            }
            match boundary {
                Boundary::Start => {
                    active.insert(position);
                }
                Boundary::End => {
                    active.remove(&position);
                }
            }
            cursor += 1;
        }

        slot.count += active.len() as u32;
        slot.members
            .extend(active.iter().map(|&position| valid[position].id().clone()));
    }
}
