//! CSV export of the raw weekly samples.
//!
//! The export ignores the grid entirely: every decodable sample becomes one
//! row, ordered by instant.

use std::io::Write;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{HeatmapError, Result};
use crate::period::{iso_millis, Period};
use crate::sample::WeeklySample;

/// Header row of the export.
pub const CSV_HEADER: [&str; 2] = ["Date", "Users"];

/// File name prefix used by the dashboard download button.
pub const EXPORT_NAME_PREFIX: &str = "UsersByTimeOfTheDaySection";

/// Samples as `(instant, users)` pairs sorted ascending by instant.
///
/// Calendar fields are read as wall-clock time in `zone`. Ties keep their
/// input order; samples with invalid calendar fields, or whose instant falls
/// outside chrono's calendar, are left out.
pub fn export_rows(samples: &[WeeklySample], zone: FixedOffset) -> Vec<(DateTime<Utc>, u64)> {
    let mut rows: Vec<(DateTime<Utc>, u64)> = samples
        .iter()
        .filter_map(|s| s.wall_clock_instant(zone).map(|instant| (instant, s.users)))
        .collect();
    rows.sort_by_key(|(instant, _)| *instant);
    rows
}

/// Write the CSV to `writer`, returning the number of data rows.
pub fn write_csv<W: Write>(writer: W, samples: &[WeeklySample], zone: FixedOffset) -> Result<usize> {
    let rows = export_rows(samples, zone);
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record(CSV_HEADER)?;
    for (instant, users) in &rows {
        csv.write_record([iso_millis(*instant), users.to_string()])?;
    }
    csv.flush()?;

    Ok(rows.len())
}

/// Render the CSV into a string.
pub fn to_csv_string(samples: &[WeeklySample], zone: FixedOffset) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, samples, zone)?;
    String::from_utf8(buf).map_err(|e| HeatmapError::Encoding(e.to_string()))
}

/// Download name for a period, e.g.
/// `UsersByTimeOfTheDaySection_start_2023-01-01T00:00:00.000Z_end_2023-01-08T00:00:00.000Z.csv`.
pub fn export_file_name(period: &Period) -> String {
    format!(
        "{}_start_{}_end_{}.csv",
        EXPORT_NAME_PREFIX,
        period.start_iso(),
        period.end_iso()
    )
}
