use polars::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use crate::core::domain::ReservationRecord;
use crate::core::error::{AnalysisError, AnalysisResult};

/// Required identifier column
pub const ID_COLUMN: &str = "id";
/// Required `HH:MM` time column
pub const TIME_COLUMN: &str = "time";
/// Optional grouping columns, in order of preference
pub const CATEGORY_COLUMNS: [&str; 2] = ["category", "location"];

/// Read delimited text into a Polars DataFrame with every column as a string.
///
/// Schema inference is disabled so ids such as `0042` and times such as
/// `08:00` reach the parser exactly as written.
pub fn read_csv_frame(bytes: &[u8], separator: u8) -> AnalysisResult<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    Ok(df)
}

/// Parse comma-separated reservation data.
pub fn parse_reservations_csv(bytes: &[u8]) -> AnalysisResult<Vec<ReservationRecord>> {
    parse_reservations_delimited(bytes, b',')
}

/// Parse reservation data with an explicit field separator.
pub fn parse_reservations_delimited(
    bytes: &[u8],
    separator: u8,
) -> AnalysisResult<Vec<ReservationRecord>> {
    let df = read_csv_frame(bytes, separator)?;
    dataframe_to_records(&df)
}

/// Parse a reservation file from disk.
pub fn parse_reservations_csv_file(
    path: &Path,
    separator: u8,
) -> AnalysisResult<Vec<ReservationRecord>> {
    let bytes = std::fs::read(path).map_err(|e| {
        AnalysisError::ingestion(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_reservations_delimited(&bytes, separator)
}

/// Convert a Polars DataFrame to reservation records
///
/// All-or-nothing: a missing `id`/`time` column, an empty `id`/`time` cell in
/// any row, or a repeated `id` rejects the whole batch. The time text itself
/// is not parsed here.
pub fn dataframe_to_records(df: &DataFrame) -> AnalysisResult<Vec<ReservationRecord>> {
    let id_name = find_column(df, ID_COLUMN).ok_or_else(|| {
        AnalysisError::ingestion(format!("Missing required column: {}", ID_COLUMN))
    })?;
    let time_name = find_column(df, TIME_COLUMN).ok_or_else(|| {
        AnalysisError::ingestion(format!("Missing required column: {}", TIME_COLUMN))
    })?;
    let category_name = CATEGORY_COLUMNS
        .iter()
        .find_map(|name| find_column(df, name));

    // Upstream frames may carry integer ids; normalize everything to text
    let id_col = df.column(&id_name)?.cast(&DataType::String)?;
    let time_col = df.column(&time_name)?.cast(&DataType::String)?;
    let category_col = match &category_name {
        Some(name) => Some(df.column(name)?.cast(&DataType::String)?),
        None => None,
    };

    let ids = id_col.str()?;
    let times = time_col.str()?;
    let categories = category_col.as_ref().map(|c| c.str()).transpose()?;

    let mut records = Vec::with_capacity(df.height());
    let mut seen: HashSet<String> = HashSet::with_capacity(df.height());

    for i in 0..df.height() {
        // 1-based data row, header excluded
        let row = i + 1;

        let id = non_empty(ids.get(i)).ok_or_else(|| {
            AnalysisError::ingestion(format!("Missing {} at row {}", ID_COLUMN, row))
        })?;
        let time_text = non_empty(times.get(i)).ok_or_else(|| {
            AnalysisError::ingestion(format!("Missing {} at row {}", TIME_COLUMN, row))
        })?;
        let category = categories
            .and_then(|col| non_empty(col.get(i)))
            .map(|s| s.to_string());

        if !seen.insert(id.to_string()) {
            return Err(AnalysisError::ingestion(format!(
                "Duplicate {} '{}' at row {}",
                ID_COLUMN, id, row
            )));
        }

        records.push(ReservationRecord::new(id, category, time_text));
    }

    log::debug!(
        "Ingested {} reservation records (grouping column: {})",
        records.len(),
        category_name.as_deref().unwrap_or("none")
    );

    Ok(records)
}

/// Reject a record list that repeats an id.
pub fn ensure_unique_ids(records: &[ReservationRecord]) -> AnalysisResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(AnalysisError::ingestion(format!(
                "Duplicate {} '{}'",
                ID_COLUMN, record.id
            )));
        }
    }
    Ok(())
}

fn find_column(df: &DataFrame, wanted: &str) -> Option<String> {
    df.get_column_names()
        .into_iter()
        .find(|name| name.trim().eq_ignore_ascii_case(wanted))
        .map(|name| name.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
