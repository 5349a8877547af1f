use anyhow::{Context, Result};
use std::path::Path;

use crate::config::AnalysisConfig;
use crate::core::domain::ReservationRecord;
use crate::parsing::csv_parser;

/// Represents the source format of reservation data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationSourceType {
    Csv,
    Tsv,
}

impl ReservationSourceType {
    pub fn separator(&self) -> u8 {
        match self {
            ReservationSourceType::Csv => b',',
            ReservationSourceType::Tsv => b'\t',
        }
    }
}

/// Result of loading reservation data
#[derive(Debug)]
pub struct ReservationLoadResult {
    pub records: Vec<ReservationRecord>,
    pub source_type: ReservationSourceType,
    pub num_records: usize,
}

impl ReservationLoadResult {
    pub fn new(records: Vec<ReservationRecord>, source_type: ReservationSourceType) -> Self {
        let num_records = records.len();
        Self {
            records,
            source_type,
            num_records,
        }
    }
}

/// Unified interface for loading reservation data from delimited files
pub struct ReservationLoader;

impl ReservationLoader {
    /// Load reservations from a file (auto-detects CSV or TSV)
    pub fn load_from_file(path: &Path) -> Result<ReservationLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        let source_type = match extension.to_lowercase().as_str() {
            "csv" => ReservationSourceType::Csv,
            "tsv" | "tab" => ReservationSourceType::Tsv,
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        };

        let records = csv_parser::parse_reservations_csv_file(path, source_type.separator())
            .with_context(|| format!("Failed to load reservations from {}", path.display()))?;

        log::info!("Loaded {} reservations from {}", records.len(), path.display());
        Ok(ReservationLoadResult::new(records, source_type))
    }

    /// Load reservations from in-memory CSV text
    pub fn load_from_csv_str(csv: &str) -> Result<ReservationLoadResult> {
        let records = csv_parser::parse_reservations_csv(csv.as_bytes())
            .context("Failed to parse CSV string")?;
        Ok(ReservationLoadResult::new(records, ReservationSourceType::Csv))
    }
}

/// Load the analysis configuration from `path`, or from the default search
/// locations when no path is given. Built-in defaults apply when no file
/// exists at any default location.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let path = match path {
        Some(path) => Some(path.to_path_buf()),
        None => AnalysisConfig::find_default_path(),
    };

    match path {
        Some(path) => AnalysisConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => {
            log::debug!("No occupancy.toml found, using default configuration");
            Ok(AnalysisConfig::default())
        }
    }
}
