//! Redaction of survey values in log output.
//!
//! Row values are health data. They only reach the logs when data logging has
//! been switched on explicitly.

use std::sync::atomic::{AtomicBool, Ordering};

use survey_model::Row;

static LOG_DATA_ENABLED: AtomicBool = AtomicBool::new(false);

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

pub fn set_log_data(enabled: bool) {
    LOG_DATA_ENABLED.store(enabled, Ordering::Release);
}

/// Returns true if row-level logging is explicitly enabled.
pub fn log_data_enabled() -> bool {
    LOG_DATA_ENABLED.load(Ordering::Relaxed)
}

/// Returns the input value when data logging is enabled, otherwise a redacted token.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        REDACTED_VALUE
    }
}

/// Row contents for log messages; column names are always kept.
pub fn redact_row(row: &Row) -> String {
    if log_data_enabled() {
        return row.to_string();
    }
    let names: Vec<&str> = row.cells.keys().map(String::as_str).collect();
    format!("{{{}: {REDACTED_VALUE}}}", names.join(", "))
}
