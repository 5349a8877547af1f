//! Serialization of analysis reports to CSV and JSON.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::types::AnalysisReport;
use crate::core::error::{AnalysisError, AnalysisResult};

/// Separator placed between member ids in the `member_ids` column
pub const MEMBER_SEPARATOR: &str = ";";

fn export_error(err: PolarsError) -> AnalysisError {
    AnalysisError::Export(err.to_string())
}

/// One row per occupied slot, across every category.
pub fn slots_dataframe(report: &AnalysisReport) -> AnalysisResult<DataFrame> {
    let rows: Vec<_> = report.occupied_slot_rows().collect();

    df!(
        "category" => rows.iter().map(|r| r.category.clone()).collect::<Vec<_>>(),
        "slot_time" => rows.iter().map(|r| r.slot_time.clone()).collect::<Vec<_>>(),
        "overlap_count" => rows.iter().map(|r| r.overlap_count).collect::<Vec<_>>(),
        "member_ids" => rows.iter().map(|r| r.member_ids.join(MEMBER_SEPARATOR)).collect::<Vec<_>>()
    )
    .map_err(export_error)
}

/// One row per in-scope reservation, in input order.
pub fn reservations_dataframe(report: &AnalysisReport) -> AnalysisResult<DataFrame> {
    let rows = &report.reservations;
    let window_bound = |i: usize| -> Vec<Option<String>> {
        rows.iter()
            .map(|r| r.effective_window.as_ref().map(|w| w[i].clone()))
            .collect()
    };

    df!(
        "id" => rows.iter().map(|r| r.id.clone()).collect::<Vec<_>>(),
        "category" => rows.iter().map(|r| r.category.clone()).collect::<Vec<_>>(),
        "reservation_time" => rows.iter().map(|r| r.reservation_time.clone()).collect::<Vec<_>>(),
        "window_start" => window_bound(0),
        "window_end" => window_bound(1),
        "status" => rows.iter().map(|r| r.status.as_str()).collect::<Vec<_>>(),
        "reason" => rows.iter().map(|r| r.reason.map(|x| x.as_str())).collect::<Vec<_>>()
    )
    .map_err(export_error)
}

fn write_csv(df: &mut DataFrame) -> AnalysisResult<String> {
    let mut buffer: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buffer)
        .include_header(true)
        .finish(df)
        .map_err(export_error)?;
    String::from_utf8(buffer).map_err(|e| AnalysisError::Export(e.to_string()))
}

/// Occupied slots as CSV text
pub fn slots_csv(report: &AnalysisReport) -> AnalysisResult<String> {
    write_csv(&mut slots_dataframe(report)?)
}

/// Reservation outcomes as CSV text
pub fn reservations_csv(report: &AnalysisReport) -> AnalysisResult<String> {
    write_csv(&mut reservations_dataframe(report)?)
}

/// Full report as pretty-printed JSON
pub fn report_json(report: &AnalysisReport) -> AnalysisResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| AnalysisError::Export(e.to_string()))
}

/// Write `slots.csv`, `reservations.csv` and `report.json` into `dir`,
/// creating it if needed. Returns the written paths.
pub fn write_exports(report: &AnalysisReport, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let outputs = [
        ("slots.csv", slots_csv(report)?),
        ("reservations.csv", reservations_csv(report)?),
        ("report.json", report_json(report)?),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, content) in outputs {
        let path = dir.join(name);
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::core::domain::ReservationRecord;
    use crate::preprocessing::analyze_records;

    fn report() -> AnalysisReport {
        analyze_records(
            vec![
                ReservationRecord::new("1", Some("Hall".into()), "12:00"),
                ReservationRecord::new("2", Some("Hall".into()), "12:00"),
                ReservationRecord::new("3", Some("Hall".into()), "bad"),
            ],
            &AnalysisConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_slots_csv_joins_members() {
        let csv = slots_csv(&report()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("category,slot_time,overlap_count,member_ids")
        );
        assert_eq!(lines.next(), Some("Hall,11:30,2,1;2"));
        assert_eq!(csv.lines().count(), 7);
    }

    #[test]
    fn test_reservations_csv_leaves_window_empty_for_malformed() {
        let csv = reservations_csv(&report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "id,category,reservation_time,window_start,window_end,status,reason"
        );
        assert_eq!(lines[1], "1,Hall,12:00,11:30,12:30,valid,");
        assert_eq!(lines[3], "3,Hall,bad,,,excluded,malformed_time");
    }

    #[test]
    fn test_write_exports_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let written = write_exports(&report(), &out).unwrap();

        assert_eq!(written.len(), 3);
        for path in &written {
            assert!(path.exists());
        }
        let json = fs::read_to_string(out.join("report.json")).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report());
    }
}
