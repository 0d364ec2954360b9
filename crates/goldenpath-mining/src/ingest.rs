//! Lenient ingestion of warehouse rows.
//!
//! The raw-path query returns one JSON object per row (JSONEachRow).
//! A malformed row — missing `path`, non-array `path`, unknown period
//! type — is skipped and counted, never aborting the batch and never
//! touching any session statistic.

use serde_json::Value;
use tracing::warn;

use crate::types::RawSessionPath;

/// Parse newline-delimited JSON rows. Returns the parsed sessions and
/// the number of rows skipped as malformed.
pub fn parse_session_rows(input: &str) -> (Vec<RawSessionPath>, usize) {
    let mut sessions = Vec::new();
    let mut skipped = 0usize;
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(value) => match session_from_value(&value) {
                Some(session) => sessions.push(session),
                None => {
                    warn!(row = index + 1, "skipping malformed session row");
                    skipped += 1;
                }
            },
            Err(error) => {
                warn!(row = index + 1, %error, "skipping unparseable row");
                skipped += 1;
            }
        }
    }
    (sessions, skipped)
}

/// Convert already-parsed JSON rows, skipping malformed ones.
pub fn sessions_from_values(rows: &[Value]) -> (Vec<RawSessionPath>, usize) {
    let mut sessions = Vec::new();
    let mut skipped = 0usize;
    for (index, value) in rows.iter().enumerate() {
        match session_from_value(value) {
            Some(session) => sessions.push(session),
            None => {
                warn!(row = index + 1, "skipping malformed session row");
                skipped += 1;
            }
        }
    }
    (sessions, skipped)
}

/// Convert one row; `None` when required fields are missing or mistyped.
pub fn session_from_value(value: &Value) -> Option<RawSessionPath> {
    serde_json::from_value(value.clone()).ok()
}
