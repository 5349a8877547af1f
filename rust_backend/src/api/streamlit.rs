//! Streamlit API Functions.
//!
//! This module contains all `#[pyfunction]` exports for the Streamlit Python
//! application. Each function is a thin wrapper around the pipeline and
//! exporters. Reports cross the boundary as JSON text.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::api::types::AnalysisReport;
use crate::core::error::{AnalysisError, ParseError};
use crate::io::export;
use crate::preprocessing::analyze_csv_text;
use crate::time;

fn to_py_err(err: AnalysisError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_report(report_json: &str) -> PyResult<AnalysisReport> {
    serde_json::from_str(report_json)
        .map_err(|e| PyValueError::new_err(format!("Invalid report JSON: {}", e)))
}

/// Analyze reservation CSV text and return the report as JSON.
#[pyfunction]
#[pyo3(signature = (csv_text, config_toml=None))]
pub fn analyze_csv(csv_text: &str, config_toml: Option<&str>) -> PyResult<String> {
    let report = analyze_csv_text(csv_text, config_toml).map_err(to_py_err)?;
    export::report_json(&report).map_err(to_py_err)
}

/// Occupied slots of a JSON report, as CSV text.
#[pyfunction]
pub fn export_slots_csv(report_json: &str) -> PyResult<String> {
    export::slots_csv(&parse_report(report_json)?).map_err(to_py_err)
}

/// Reservation outcomes of a JSON report, as CSV text.
#[pyfunction]
pub fn export_reservations_csv(report_json: &str) -> PyResult<String> {
    export::reservations_csv(&parse_report(report_json)?).map_err(to_py_err)
}

#[pyfunction]
pub fn parse_clock_time(text: &str) -> PyResult<i32> {
    time::parse_clock_time(text).map_err(|e: ParseError| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
pub fn format_minutes(minutes: i32) -> String {
    time::format_minutes(minutes)
}

/// Register all API functions with the Python module.
pub fn register_api_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_csv, m)?)?;
    m.add_function(wrap_pyfunction!(export_slots_csv, m)?)?;
    m.add_function(wrap_pyfunction!(export_reservations_csv, m)?)?;
    m.add_function(wrap_pyfunction!(parse_clock_time, m)?)?;
    m.add_function(wrap_pyfunction!(format_minutes, m)?)?;
    Ok(())
}
