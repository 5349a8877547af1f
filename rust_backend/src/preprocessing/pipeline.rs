use std::collections::HashMap;

use crate::api::types::{AnalysisReport, CategoryReport, ReservationRow, Summary};
use crate::config::{AnalysisConfig, AnalysisParams};
use crate::core::domain::{Reservation, ReservationId, ReservationRecord};
use crate::core::error::{AnalysisError, AnalysisResult};
use crate::parsing::csv_parser::{ensure_unique_ids, parse_reservations_csv};
use crate::services::cache::AnalysisCache;
use crate::services::checksum::input_checksum;
use crate::services::occupancy::{analyze_partition, GroupedAnalysis};
use crate::transformations::grouping::partition_by_category;

/// Main analysis pipeline
///
/// Owns the caller's record list and the configuration it is analyzed under.
/// Every [`run`](Self::run) recomputes from scratch.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    records: Vec<ReservationRecord>,
}

impl AnalysisPipeline {
    /// Create an empty pipeline with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    /// Replace the record list. Rejects the batch on duplicate ids.
    pub fn with_records(mut self, records: Vec<ReservationRecord>) -> AnalysisResult<Self> {
        ensure_unique_ids(&records)?;
        self.records = records;
        Ok(self)
    }

    /// Append one manually entered record
    pub fn add_record(&mut self, record: ReservationRecord) -> AnalysisResult<()> {
        if self.records.iter().any(|r| r.id == record.id) {
            return Err(AnalysisError::ingestion(format!(
                "Duplicate reservation id '{}'",
                record.id
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn records(&self) -> &[ReservationRecord] {
        &self.records
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AnalysisConfig) {
        self.config = config;
    }

    pub fn input_checksum(&self) -> AnalysisResult<String> {
        Ok(input_checksum(&self.records, &self.config.params()?))
    }

    /// Run the full analysis
    ///
    /// # Returns
    /// AnalysisReport with per-category grids and one row per in-scope record
    ///
    /// # Errors
    /// `Configuration` if the configuration is invalid. Nothing is computed in
    /// that case. Malformed times never fail the run.
    pub fn run(&self) -> AnalysisResult<AnalysisReport> {
        let params = self.config.params()?;
        log::info!(
            "Analyzing {} records: window {}, buffer {} min, slots {} min, filter '{}', {}",
            self.records.len(),
            params.window,
            params.buffer,
            params.granularity,
            params.category_filter,
            params.strategy
        );

        let checksum = input_checksum(&self.records, &params);
        let selected = params.category_filter.apply(&self.records);

        // Step 1: Partition raw records so malformed ones stay in their category
        let groups = partition_by_category(&selected);

        // Step 2: Parse and analyze each category
        let mut rows: HashMap<ReservationId, ReservationRow> = HashMap::new();
        let mut grouped = GroupedAnalysis::default();
        let mut malformed_per_category: Vec<usize> = Vec::with_capacity(groups.len());

        for group in &groups {
            let (parsed, malformed) = parse_records(&group.items, &mut rows);
            let analysis = analyze_partition(group.category.clone(), &parsed, &params)?;
            record_rows(&analysis.outcome.valid, params.buffer, true, &mut rows);
            record_rows(&analysis.outcome.excluded, params.buffer, false, &mut rows);
            malformed_per_category.push(malformed);
            grouped.categories.push(analysis);
        }

        // Step 3: Assemble the report
        let categories: Vec<CategoryReport> = grouped
            .categories
            .iter()
            .zip(&malformed_per_category)
            .map(|(analysis, &malformed)| {
                let mut report = CategoryReport::from(analysis);
                report.summary.total += malformed;
                report.summary.excluded += malformed;
                report
            })
            .collect();

        let reservations: Vec<ReservationRow> = selected
            .iter()
            .filter_map(|record| rows.remove(&record.id))
            .collect();

        let valid: usize = categories.iter().map(|c| c.summary.valid).sum();
        let summary = Summary {
            total: selected.len(),
            valid,
            excluded: selected.len() - valid,
            max_overlap: grouped.max_overlap(),
            occupied_slot_count: grouped.occupied_slot_count(),
        };

        log::info!(
            "Analysis complete: {} valid, {} excluded, peak overlap {} across {} categories",
            summary.valid,
            summary.excluded,
            summary.max_overlap,
            categories.len()
        );

        Ok(AnalysisReport {
            summary,
            categories,
            reservations,
            operating_window: params.window.to_clock_pair(),
            buffer_minutes: params.buffer,
            slot_granularity_minutes: params.granularity,
            input_checksum: checksum,
        })
    }

    /// Run through `cache`, recomputing only when the inputs changed.
    pub fn run_cached(&self, cache: &mut AnalysisCache) -> AnalysisResult<AnalysisReport> {
        let checksum = self.input_checksum()?;
        cache.get_or_try_insert_with(&checksum, || self.run())
    }

    /// Effective parameters for the current configuration
    pub fn params(&self) -> AnalysisResult<AnalysisParams> {
        self.config.params()
    }
}

/// Parse each record, recording a row for every malformed one.
///
/// Returns the parsed reservations and the number of malformed records.
fn parse_records(
    records: &[ReservationRecord],
    rows: &mut HashMap<ReservationId, ReservationRow>,
) -> (Vec<Reservation>, usize) {
    let mut parsed = Vec::with_capacity(records.len());
    let mut malformed = 0;

    for record in records {
        match record.parse() {
            Ok(reservation) => parsed.push(reservation),
            Err(e) => {
                log::warn!(
                    "Reservation {} excluded: {} (time text '{}')",
                    record.id,
                    e,
                    record.time_text
                );
                rows.insert(record.id.clone(), ReservationRow::malformed(record, &e));
                malformed += 1;
            }
        }
    }

    (parsed, malformed)
}

fn record_rows(
    reservations: &[Reservation],
    buffer: u32,
    valid: bool,
    rows: &mut HashMap<ReservationId, ReservationRow>,
) {
    for reservation in reservations {
        rows.insert(
            reservation.id().clone(),
            ReservationRow::from_reservation(reservation, buffer, valid),
        );
    }
}

/// Analyze a record batch under `config` in one call.
pub fn analyze_records(
    records: Vec<ReservationRecord>,
    config: &AnalysisConfig,
) -> AnalysisResult<AnalysisReport> {
    AnalysisPipeline::new(config.clone())
        .with_records(records)?
        .run()
}

/// Parse CSV text and analyze it, with an optional TOML configuration.
///
/// Without a configuration the built-in defaults apply.
pub fn analyze_csv_text(csv: &str, config_toml: Option<&str>) -> AnalysisResult<AnalysisReport> {
    let config = match config_toml {
        Some(text) => AnalysisConfig::from_toml_str(text)?,
        None => AnalysisConfig::default(),
    };
    config.validate()?;
    let records = parse_reservations_csv(csv.as_bytes())?;
    log::debug!("Ingested {} records from CSV text", records.len());
    analyze_records(records, &config)
}

/// Human-readable one-line summary, as printed by the CLI.
pub fn describe_summary(report: &AnalysisReport) -> String {
    format!(
        "{} reservations ({} valid, {} excluded) in {}-{}: peak overlap {}, {} occupied slots",
        report.summary.total,
        report.summary.valid,
        report.summary.excluded,
        report.operating_window[0],
        report.operating_window[1],
        report.summary.max_overlap,
        report.summary.occupied_slot_count
    )
}
