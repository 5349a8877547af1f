//! Analysis configuration file support.
//!
//! This module provides utilities for reading analysis parameters from TOML
//! configuration files and validating them into [`AnalysisParams`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::OccupancyStrategy;
use crate::core::domain::{
    OperatingWindow, DEFAULT_BUFFER_MINUTES, DEFAULT_SLOT_GRANULARITY_MINUTES, MINUTES_PER_DAY,
};
use crate::core::error::{AnalysisError, AnalysisResult};
use crate::transformations::CategoryFilter;

/// Analysis configuration from file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub operating_window: WindowSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// Operating window bounds in whole hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

/// Buffering, slot layout and scoping settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_buffer_minutes")]
    pub buffer_minutes: u32,
    #[serde(default = "default_slot_granularity_minutes")]
    pub slot_granularity_minutes: u32,
    #[serde(default)]
    pub category_filter: CategoryFilter,
    #[serde(default)]
    pub strategy: OccupancyStrategy,
}

fn default_start_hour() -> u32 {
    8
}

fn default_end_hour() -> u32 {
    18
}

fn default_buffer_minutes() -> u32 {
    DEFAULT_BUFFER_MINUTES
}

fn default_slot_granularity_minutes() -> u32 {
    DEFAULT_SLOT_GRANULARITY_MINUTES
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            buffer_minutes: default_buffer_minutes(),
            slot_granularity_minutes: default_slot_granularity_minutes(),
            category_filter: CategoryFilter::default(),
            strategy: OccupancyStrategy::default(),
        }
    }
}

/// Validated parameters for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisParams {
    pub window: OperatingWindow,
    pub buffer: u32,
    pub granularity: u32,
    pub strategy: OccupancyStrategy,
    pub category_filter: CategoryFilter,
}

impl AnalysisParams {
    /// Stable textual form used when hashing analysis inputs.
    pub fn fingerprint(&self) -> String {
        format!(
            "window={}..{};buffer={};granularity={};strategy={};filter={}",
            self.window.start(),
            self.window.end(),
            self.buffer,
            self.granularity,
            self.strategy,
            self.category_filter
        )
    }
}

impl AnalysisConfig {
    pub fn with_window(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.operating_window = WindowSettings {
            start_hour,
            end_hour,
        };
        self
    }

    pub fn with_buffer_minutes(mut self, buffer_minutes: u32) -> Self {
        self.analysis.buffer_minutes = buffer_minutes;
        self
    }

    pub fn with_slot_granularity(mut self, minutes: u32) -> Self {
        self.analysis.slot_granularity_minutes = minutes;
        self
    }

    pub fn with_category_filter(mut self, filter: impl Into<CategoryFilter>) -> Self {
        self.analysis.category_filter = filter.into();
        self
    }

    pub fn with_strategy(mut self, strategy: OccupancyStrategy) -> Self {
        self.analysis.strategy = strategy;
        self
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AnalysisResult<Self> {
        toml::from_str(content).map_err(|e| {
            AnalysisError::configuration(format!("Failed to parse config: {}", e))
        })
    }

    /// Load analysis configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AnalysisConfig)` if successful
    /// * `Err(AnalysisError::Configuration)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalysisError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Load analysis configuration from the default location.
    ///
    /// Searches for `occupancy.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> AnalysisResult<Self> {
        match Self::find_default_path() {
            Some(path) => {
                log::info!("Loading analysis config from {}", path.display());
                Self::from_file(&path)
            }
            None => Err(AnalysisError::configuration(
                "No occupancy.toml found in standard locations",
            )),
        }
    }

    /// First existing `occupancy.toml` among the default locations.
    pub fn find_default_path() -> Option<PathBuf> {
        [
            PathBuf::from("occupancy.toml"),
            PathBuf::from("rust_backend/occupancy.toml"),
            PathBuf::from("../occupancy.toml"),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// Validate settings into run parameters.
    ///
    /// Fails with `AnalysisError::Configuration` before any computation when
    /// `start_hour >= end_hour`, `end_hour > 24`, the granularity is zero or
    /// longer than a day, or the buffer exceeds a day.
    pub fn params(&self) -> AnalysisResult<AnalysisParams> {
        let window = OperatingWindow::from_hours(
            self.operating_window.start_hour,
            self.operating_window.end_hour,
        )?;

        let granularity = self.analysis.slot_granularity_minutes;
        if granularity == 0 || granularity > MINUTES_PER_DAY as u32 {
            return Err(AnalysisError::configuration(format!(
                "slot_granularity_minutes must be between 1 and {}, got {}",
                MINUTES_PER_DAY, granularity
            )));
        }

        let buffer = self.analysis.buffer_minutes;
        if buffer > MINUTES_PER_DAY as u32 {
            return Err(AnalysisError::configuration(format!(
                "buffer_minutes must be at most {}, got {}",
                MINUTES_PER_DAY, buffer
            )));
        }

        Ok(AnalysisParams {
            window,
            buffer,
            granularity,
            strategy: self.analysis.strategy,
            category_filter: self.analysis.category_filter.clone(),
        })
    }

    /// Check the configuration without keeping the derived parameters.
    pub fn validate(&self) -> AnalysisResult<()> {
        self.params().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = AnalysisConfig::default().params().unwrap();
        assert_eq!(params.window, OperatingWindow::from_hours(8, 18).unwrap());
        assert_eq!(params.buffer, 30);
        assert_eq!(params.granularity, 10);
        assert_eq!(params.strategy, OccupancyStrategy::SweepLine);
        assert_eq!(params.category_filter, CategoryFilter::All);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            [operating_window]
            start_hour = 6
            end_hour = 22

            [analysis]
            buffer_minutes = 15
            slot_granularity_minutes = 5
            category_filter = "Room 2"
            strategy = "naive"
            "#,
        )
        .unwrap();

        let params = config.params().unwrap();
        assert_eq!(params.window.start(), 360);
        assert_eq!(params.window.end(), 1320);
        assert_eq!(params.buffer, 15);
        assert_eq!(params.granularity, 5);
        assert_eq!(params.strategy, OccupancyStrategy::Naive);
        assert_eq!(params.category_filter, CategoryFilter::Only("Room 2".to_string()));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalysisConfig::from_toml_str("[operating_window]\nend_hour = 20\n").unwrap();
        assert_eq!(config.operating_window.start_hour, 8);
        assert_eq!(config.operating_window.end_hour, 20);
        assert_eq!(config.analysis, AnalysisSettings::default());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = AnalysisConfig::default().with_window(18, 8).params().unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));

        let err = AnalysisConfig::default().with_window(9, 9).params().unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        assert!(AnalysisConfig::default().with_window(0, 25).params().is_err());
        assert!(AnalysisConfig::default().with_slot_granularity(0).params().is_err());
        assert!(AnalysisConfig::default().with_buffer_minutes(2000).params().is_err());
    }

    #[test]
    fn test_negative_hour_is_a_configuration_error() {
        let err = AnalysisConfig::from_toml_str("[operating_window]\nstart_hour = -1\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Configuration(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("occupancy.toml");
        fs::write(&path, "[analysis]\nbuffer_minutes = 45\n").unwrap();

        let config = AnalysisConfig::from_file(&path).unwrap();
        assert_eq!(config.analysis.buffer_minutes, 45);

        assert!(AnalysisConfig::from_file(dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_fingerprint_tracks_parameters() {
        let a = AnalysisConfig::default().params().unwrap();
        let b = AnalysisConfig::default().with_buffer_minutes(20).params().unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
