//! Errors for heatmap inputs and CSV export.
//!
//! Bad individual samples are never errors; they are skipped and counted.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatmapError>;

#[derive(Error, Debug)]
pub enum HeatmapError {
    /// A period bound is not an ISO-8601 instant
    #[error("invalid {field} instant: {value}")]
    InvalidInstant { field: &'static str, value: String },

    /// UTC offset outside ±24h
    #[error("invalid UTC offset: {0} minutes")]
    InvalidOffset(i32),

    #[error("unknown timezone mode: {0}")]
    UnknownTimezone(String),

    #[error("unknown period: {0}")]
    UnknownPreset(String),

    /// A period longer than the configured limit
    #[error("period spans {days} days, limit is {max_days}")]
    PeriodTooLong { days: i64, max_days: i64 },

    /// Date arithmetic left chrono's calendar
    #[error("instant out of range: {0}")]
    OutOfRange(String),

    /// The response body has no `week` array
    #[error("response body has no `week` array")]
    MissingWeek,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output is not UTF-8: {0}")]
    Encoding(String),
}
