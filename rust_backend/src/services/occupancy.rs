//! Occupancy analysis service.
//!
//! Runs validation, grid construction and overlap counting for each category
//! independently. Slots are never shared across categories, so the overall
//! peak is the largest per-category peak, not a sum.

use std::collections::BTreeSet;

use crate::algorithms::analysis::{summarize, OccupancySummary};
use crate::algorithms::occupancy::OccupancyEngine;
use crate::algorithms::slots::SlotGrid;
use crate::config::AnalysisParams;
use crate::core::domain::Reservation;
use crate::core::error::AnalysisResult;
use crate::preprocessing::validator::{ReservationValidator, ValidationOutcome};
use crate::transformations::grouping::partition_by_category;

/// Result of analyzing one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAnalysis {
    pub category: String,
    pub outcome: ValidationOutcome,
    pub grid: SlotGrid,
    pub summary: OccupancySummary,
}

impl CategoryAnalysis {
    pub fn max_overlap(&self) -> u32 {
        self.summary.max_overlap
    }

    pub fn total(&self) -> usize {
        self.outcome.total()
    }
}

/// Analyze one category's reservations in isolation.
pub fn analyze_partition(
    category: impl Into<String>,
    reservations: &[Reservation],
    params: &AnalysisParams,
) -> AnalysisResult<CategoryAnalysis> {
    let category = category.into();
    let validator = ReservationValidator::new(params.window, params.buffer);
    let outcome = validator.filter(reservations);

    let grid = SlotGrid::build(&params.window, params.granularity)?;
    let grid = OccupancyEngine::new(params.buffer, params.strategy).compute(&outcome.valid, grid);
    let summary = summarize(grid.slots());

    log::debug!(
        "Category '{}': {} valid, {} excluded, peak overlap {}",
        category,
        outcome.valid.len(),
        outcome.excluded.len(),
        summary.max_overlap
    );

    Ok(CategoryAnalysis {
        category,
        outcome,
        grid,
        summary,
    })
}

/// Per-category results of one grouped run, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedAnalysis {
    pub categories: Vec<CategoryAnalysis>,
}

impl GroupedAnalysis {
    pub fn category(&self, name: &str) -> Option<&CategoryAnalysis> {
        self.categories.iter().find(|c| c.category == name)
    }

    /// Largest per-category peak.
    pub fn max_overlap(&self) -> u32 {
        self.categories
            .iter()
            .map(CategoryAnalysis::max_overlap)
            .max()
            .unwrap_or(0)
    }

    /// Number of distinct slot positions occupied in at least one category.
    pub fn occupied_slot_count(&self) -> usize {
        let occupied: BTreeSet<usize> = self
            .categories
            .iter()
            .flat_map(|c| c.grid.occupied().map(|slot| slot.index))
            .collect();
        occupied.len()
    }

    /// Categories ordered by reservation count, largest first.
    pub fn by_size(&self) -> Vec<&CategoryAnalysis> {
        let mut ordered: Vec<&CategoryAnalysis> = self.categories.iter().collect();
        ordered.sort_by(|a, b| b.total().cmp(&a.total()));
        ordered
    }
}

/// Filter by category, partition, and analyze each partition.
///
/// A filter naming an unknown category yields an empty result.
pub fn analyze_grouped(
    reservations: &[Reservation],
    params: &AnalysisParams,
) -> AnalysisResult<GroupedAnalysis> {
    let selected = params.category_filter.apply(reservations);
    let groups = partition_by_category(&selected);

    let categories = groups
        .iter()
        .map(|group| analyze_partition(group.category.clone(), &group.items, params))
        .collect::<AnalysisResult<Vec<_>>>()?;

    log::info!(
        "Analyzed {} reservations across {} categories",
        selected.len(),
        categories.len()
    );

    Ok(GroupedAnalysis { categories })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn params() -> AnalysisParams {
        AnalysisConfig::default().params().unwrap()
    }

    fn at(id: &str, category: &str, hour: i32, minute: i32) -> Reservation {
        Reservation::new(id, Some(category.to_string()), hour * 60 + minute)
    }

    #[test]
    fn test_partition_counts_only_valid() {
        let reservations = vec![
            at("1", "A", 12, 0),
            at("2", "A", 12, 0),
            at("3", "A", 6, 0),
        ];
        let result = analyze_partition("A", &reservations, &params()).unwrap();

        assert_eq!(result.outcome.valid.len(), 2);
        assert_eq!(result.outcome.excluded.len(), 1);
        assert_eq!(result.max_overlap(), 2);
        assert_eq!(result.summary.occupied_slot_count, 6);
    }

    #[test]
    fn test_grouped_max_is_not_a_sum() {
        let reservations = vec![
            at("1", "Hall", 12, 0),
            at("2", "Hall", 12, 0),
            at("3", "Garden", 12, 0),
            at("4", "Garden", 12, 0),
        ];
        let grouped = analyze_grouped(&reservations, &params()).unwrap();

        assert_eq!(grouped.categories.len(), 2);
        assert_eq!(grouped.category("Hall").unwrap().max_overlap(), 2);
        assert_eq!(grouped.category("Garden").unwrap().max_overlap(), 2);
        assert_eq!(grouped.max_overlap(), 2);
        assert_eq!(grouped.occupied_slot_count(), 6);
    }

    #[test]
    fn test_grouped_occupied_is_union() {
        let reservations = vec![at("1", "A", 10, 0), at("2", "B", 15, 0)];
        let grouped = analyze_grouped(&reservations, &params()).unwrap();
        assert_eq!(grouped.occupied_slot_count(), 12);
    }

    #[test]
    fn test_filter_to_unknown_category_is_empty() {
        let reservations = vec![at("1", "A", 12, 0)];
        let params = AnalysisConfig::default()
            .with_category_filter("Nowhere")
            .params()
            .unwrap();
        let grouped = analyze_grouped(&reservations, &params).unwrap();

        assert!(grouped.categories.is_empty());
        assert_eq!(grouped.max_overlap(), 0);
        assert_eq!(grouped.occupied_slot_count(), 0);
    }

    #[test]
    fn test_by_size_orders_largest_first() {
        let reservations = vec![
            at("1", "Small", 9, 0),
            at("2", "Large", 10, 0),
            at("3", "Large", 11, 0),
        ];
        let grouped = analyze_grouped(&reservations, &params()).unwrap();
        let names: Vec<&str> = grouped.by_size().iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Large", "Small"]);
    }
}
