//! Axis labels and render hints for the heatmap.

use chrono::{DateTime, FixedOffset, NaiveTime, Utc};

use crate::grid::HOURS_PER_DAY;

/// Number of columns for which weekday labels are shown.
pub const DAYS_PER_WEEK: usize = 7;

/// Weekday names for the bottom axis.
///
/// Only a full week gets names; any other column count yields empty
/// labels so partial periods do not show a misleading weekday axis.
pub fn day_labels(columns: &[DateTime<Utc>], zone: FixedOffset) -> Vec<String> {
    if columns.len() != DAYS_PER_WEEK {
        return vec![String::new(); columns.len()];
    }
    columns
        .iter()
        .map(|key| key.with_timezone(&zone).format("%A").to_string())
        .collect()
}

/// Twelve-hour clock label for an hour row, e.g. `2:00 PM`.
pub fn hour_label(hour: u32) -> Option<String> {
    NaiveTime::from_hms_opt(hour, 0, 0).map(|t| t.format("%-I:%M %p").to_string())
}

/// Labels for all 24 rows, midnight first.
pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY as u32).filter_map(hour_label).collect()
}

/// Transitions are only animated for a week or less of columns.
pub fn should_animate(column_count: usize) -> bool {
    column_count <= DAYS_PER_WEEK
}
