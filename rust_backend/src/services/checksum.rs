//! Content checksums for analysis inputs.

use sha2::{Digest, Sha256};

use crate::config::AnalysisParams;
use crate::core::domain::ReservationRecord;

/// Checksum of a record batch together with the parameters it is analyzed
/// under. Two runs with the same checksum produce the same report.
pub fn input_checksum(records: &[ReservationRecord], params: &AnalysisParams) -> String {
    let mut hasher = Sha256::new();
    hasher.update(params.fingerprint().as_bytes());
    for record in records {
        // Unit separators keep field boundaries unambiguous
        hasher.update(b"\x1e");
        hasher.update(record.id.as_str().as_bytes());
        hasher.update(b"\x1f");
        // Presence tag: an absent category and an empty label partition differently
        match record.category.as_deref() {
            Some(label) => {
                hasher.update(b"+");
                hasher.update(label.as_bytes());
            }
            None => hasher.update(b"-"),
        }
        hasher.update(b"\x1f");
        hasher.update(record.time_text.as_bytes());
    }
    hex::encode(hasher.finalize())
}
