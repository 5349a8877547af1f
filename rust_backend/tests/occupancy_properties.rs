//! Property tests for the occupancy engine.
//!
//! These check that:
//! 1. Naive and sweep-line strategies produce identical grids
//! 2. Slot counts match a brute-force count over buffered intervals
//! 3. The sum of slot counts equals the sum of slots each reservation occupies
//! 4. A reservation is excluded exactly when its interval misses the window
//! 5. The grouped peak is the largest per-category peak

use proptest::prelude::*;

use occupancy_rust::algorithms::{summarize, OccupancyEngine, OccupancyStrategy, SlotGrid};
use occupancy_rust::config::AnalysisConfig;
use occupancy_rust::core::{OperatingWindow, Reservation};
use occupancy_rust::preprocessing::ReservationValidator;
use occupancy_rust::services::analyze_grouped;

// ==================== Strategies ====================

fn window_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..24).prop_flat_map(|start| (Just(start), (start + 1)..=24))
}

fn reservations_strategy() -> impl Strategy<Value = Vec<Reservation>> {
    prop::collection::vec((0i32..1440, 0usize..3), 0..40).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (instant, category))| {
                let label = ["A", "B", "C"][category].to_string();
                Reservation::new(format!("r{}", i), Some(label), instant)
            })
            .collect()
    })
}

fn compute(
    reservations: &[Reservation],
    window: &OperatingWindow,
    buffer: u32,
    granularity: u32,
    strategy: OccupancyStrategy,
) -> SlotGrid {
    let valid = ReservationValidator::new(*window, buffer)
        .filter(reservations)
        .valid;
    let grid = SlotGrid::build(window, granularity).unwrap();
    OccupancyEngine::new(buffer, strategy).compute(&valid, grid)
}

proptest! {
    #[test]
    fn prop_strategies_agree(
        (start, end) in window_strategy(),
        reservations in reservations_strategy(),
        buffer in 0u32..180,
        granularity in 1u32..90,
    ) {
        let window = OperatingWindow::from_hours(start, end).unwrap();
        let naive = compute(&reservations, &window, buffer, granularity, OccupancyStrategy::Naive);
        let sweep = compute(&reservations, &window, buffer, granularity, OccupancyStrategy::SweepLine);
        prop_assert_eq!(naive, sweep);
    }

    #[test]
    fn prop_counts_match_brute_force(
        (start, end) in window_strategy(),
        reservations in reservations_strategy(),
        buffer in 0u32..180,
        granularity in 1u32..90,
    ) {
        let window = OperatingWindow::from_hours(start, end).unwrap();
        let grid = compute(&reservations, &window, buffer, granularity, OccupancyStrategy::SweepLine);

        for slot in grid.slots() {
            let expected: Vec<String> = reservations
                .iter()
                .filter(|r| r.buffered_interval(buffer).intersects(&window))
                .filter(|r| r.buffered_interval(buffer).contains(slot.start))
                .map(|r| r.id().to_string())
                .collect();
            let actual: Vec<String> = slot.members.iter().map(|id| id.to_string()).collect();

            prop_assert_eq!(slot.count as usize, expected.len());
            prop_assert_eq!(actual, expected);
        }
    }

    #[test]
    fn prop_total_count_identity(
        (start, end) in window_strategy(),
        reservations in reservations_strategy(),
        buffer in 0u32..180,
        granularity in 1u32..90,
    ) {
        let window = OperatingWindow::from_hours(start, end).unwrap();
        let grid = compute(&reservations, &window, buffer, granularity, OccupancyStrategy::SweepLine);

        let per_reservation: u64 = reservations
            .iter()
            .map(|r| {
                let interval = r.buffered_interval(buffer);
                grid.slots().iter().filter(|s| interval.contains(s.start)).count() as u64
            })
            .sum();
        prop_assert_eq!(grid.total_count(), per_reservation);

        let summary = summarize(grid.slots());
        let histogram_slots: usize = summary.histogram.values().sum();
        prop_assert_eq!(histogram_slots, summary.occupied_slot_count);
    }

    #[test]
    fn prop_exclusion_iff_no_intersection(
        (start, end) in window_strategy(),
        reservations in reservations_strategy(),
        buffer in 0u32..180,
    ) {
        let window = OperatingWindow::from_hours(start, end).unwrap();
        let outcome = ReservationValidator::new(window, buffer).filter(&reservations);

        prop_assert_eq!(outcome.total(), reservations.len());
        for r in &outcome.excluded {
            let interval = r.buffered_interval(buffer);
            prop_assert!(interval.end <= window.start() || interval.start >= window.end());
        }
        for r in &outcome.valid {
            prop_assert!(r.buffered_interval(buffer).intersects(&window));
        }
    }

    #[test]
    fn prop_grouped_peak_is_max_not_sum(
        reservations in reservations_strategy(),
        buffer in 0u32..120,
    ) {
        let params = AnalysisConfig::default()
            .with_window(0, 24)
            .with_buffer_minutes(buffer)
            .params()
            .unwrap();
        let grouped = analyze_grouped(&reservations, &params).unwrap();

        let per_category_max = grouped
            .categories
            .iter()
            .map(|c| c.summary.max_overlap)
            .max()
            .unwrap_or(0);
        prop_assert_eq!(grouped.max_overlap(), per_category_max);

        let largest_group = grouped.categories.iter().map(|c| c.total()).max().unwrap_or(0);
        prop_assert!(grouped.max_overlap() as usize <= largest_group);
    }
}
