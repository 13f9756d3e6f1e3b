//! Hour × date bucket grid and the aggregation that fills it.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::period::{end_of_day, iso_millis, start_of_day, Period, TimezoneMode};
use crate::sample::WeeklySample;

/// Rows in every grid, one per hour of the day.
pub const HOURS_PER_DAY: usize = 24;

/// A 24 × D matrix of user counts keyed by hour and end-of-day instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketGrid {
    columns: Vec<DateTime<Utc>>,
    cells: Vec<Vec<u64>>,
}

impl BucketGrid {
    /// An all-zero grid over the given ascending column keys.
    pub fn new(columns: Vec<DateTime<Utc>>) -> Self {
        let cells = vec![vec![0; columns.len()]; HOURS_PER_DAY];
        Self { columns, cells }
    }

    pub fn columns(&self) -> &[DateTime<Utc>] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, key: DateTime<Utc>) -> Option<usize> {
        self.columns.binary_search(&key).ok()
    }

    /// Add `users` to a cell, saturating at `u64::MAX`. Returns false if the
    /// hour or column is not part of the grid.
    pub fn add(&mut self, hour: usize, key: DateTime<Utc>, users: u64) -> bool {
        let Some(column) = self.column_index(key) else {
            return false;
        };
        match self.cells.get_mut(hour) {
            Some(row) => {
                row[column] = row[column].saturating_add(users);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, hour: usize, column: usize) -> Option<u64> {
        self.cells.get(hour)?.get(column).copied()
    }

    pub fn row(&self, hour: usize) -> Option<&[u64]> {
        self.cells.get(hour).map(Vec::as_slice)
    }

    /// Sum of every cell, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.cells
            .iter()
            .flatten()
            .fold(0u64, |sum, &v| sum.saturating_add(v))
    }

    /// The busiest cell as `(hour, column, users)`; `None` when every cell is zero.
    pub fn peak(&self) -> Option<(usize, usize, u64)> {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(hour, row)| row.iter().enumerate().map(move |(col, &v)| (hour, col, v)))
            .filter(|&(_, _, v)| v > 0)
            .fold(None, |best: Option<(usize, usize, u64)>, cell| match best {
                Some(b) if b.2 >= cell.2 => Some(b),
                _ => Some(cell),
            })
    }

    /// Column keys serialized for the renderer.
    pub fn column_keys(&self) -> Vec<String> {
        self.columns.iter().copied().map(iso_millis).collect()
    }

    /// One renderer row per hour: `{ "hour": "14", "<key>": n, ... }`.
    pub fn rows(&self) -> Vec<HeatmapRow> {
        let keys = self.column_keys();
        self.cells
            .iter()
            .enumerate()
            .map(|(hour, row)| HeatmapRow {
                hour: hour.to_string(),
                cells: keys.iter().cloned().zip(row.iter().copied()).collect(),
            })
            .collect()
    }
}

/// One hour row in the shape the heatmap renderer indexes by `hour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub hour: String,
    #[serde(flatten)]
    pub cells: BTreeMap<String, u64>,
}

/// What happened to each input sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationStats {
    /// Added to a cell
    pub accepted: usize,
    /// Dropped by the local-mode boundary rule
    pub boundary_skipped: usize,
    /// Normalized to a date outside the column set
    pub out_of_range: usize,
    /// Calendar fields do not name a real hour
    pub malformed: usize,
}

impl AggregationStats {
    pub fn total(&self) -> usize {
        self.accepted + self.boundary_skipped + self.out_of_range + self.malformed
    }
}

/// The filled grid plus per-sample accounting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    pub mode: TimezoneMode,
    pub zone: FixedOffset,
    pub grid: BucketGrid,
    pub stats: AggregationStats,
}

/// Bucket samples into the hour × date grid for `period`.
///
/// In [`TimezoneMode::Local`] each sample is moved into `offset` before its
/// hour and day are read, and samples landing exactly on the period end or
/// on a local day that starts at the period start are skipped. `offset` is
/// ignored in UTC mode.
pub fn aggregate(
    period: &Period,
    mode: TimezoneMode,
    offset: FixedOffset,
    samples: &[WeeklySample],
) -> Heatmap {
    let zone = mode.zone(offset);
    let mut grid = BucketGrid::new(period.column_keys(mode, offset));
    let mut stats = AggregationStats::default();

    for sample in samples {
        let Some(instant) = sample.instant() else {
            tracing::debug!(?sample, "skipping sample with invalid calendar fields");
            stats.malformed += 1;
            continue;
        };

        if mode == TimezoneMode::Local
            && (instant == period.end || start_of_day(instant, zone) == Some(period.start))
        {
            stats.boundary_skipped += 1;
            continue;
        }

        let Some(key) = end_of_day(instant, zone) else {
            tracing::debug!(?sample, "skipping sample at the edge of the calendar");
            stats.malformed += 1;
            continue;
        };

        let hour = instant.with_timezone(&zone).hour() as usize;
        if grid.add(hour, key, sample.users) {
            stats.accepted += 1;
        } else {
            tracing::debug!(?sample, %instant, "sample falls outside the period columns");
            stats.out_of_range += 1;
        }
    }

    tracing::debug!(
        mode = %mode,
        columns = grid.column_count(),
        accepted = stats.accepted,
        skipped = stats.total() - stats.accepted,
        "aggregated users by time of day"
    );

    Heatmap {
        mode,
        zone,
        grid,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::{offset_from_minutes, utc_zone};
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn week() -> Period {
        Period::new(utc(2023, 1, 1, 0), utc(2023, 1, 8, 0))
    }

    #[test]
    fn test_single_sample_in_utc_week() {
        let samples = [WeeklySample::new(5, 14, 3, 1, 2023)];
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &samples);

        assert_eq!(heatmap.grid.column_count(), 8);
        let col = heatmap
            .grid
            .column_keys()
            .iter()
            .position(|k| k == "2023-01-03T23:59:59.999Z")
            .unwrap();
        assert_eq!(heatmap.grid.get(14, col), Some(5));
        assert_eq!(heatmap.grid.total(), 5);
        assert_eq!(heatmap.stats.accepted, 1);
    }

    #[test]
    fn test_no_samples_gives_zero_grid() {
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &[]);
        assert_eq!(heatmap.grid.total(), 0);
        assert_eq!(heatmap.grid.peak(), None);
        assert_eq!(heatmap.grid.rows().len(), HOURS_PER_DAY);
        assert!(heatmap
            .grid
            .rows()
            .iter()
            .all(|row| row.cells.len() == 8 && row.cells.values().all(|&v| v == 0)));
    }

    #[test]
    fn test_samples_in_same_cell_are_summed() {
        let samples = [
            WeeklySample::new(2, 9, 5, 1, 2023),
            WeeklySample::new(3, 9, 5, 1, 2023),
            WeeklySample::new(1, 10, 5, 1, 2023),
        ];
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &samples);

        assert_eq!(heatmap.grid.get(9, 4), Some(5));
        assert_eq!(heatmap.grid.get(10, 4), Some(1));
        assert_eq!(heatmap.grid.peak(), Some((9, 4, 5)));
    }

    #[test]
    fn test_utc_mode_ignores_offset() {
        let samples = [WeeklySample::new(4, 23, 2, 1, 2023)];
        let offset = offset_from_minutes(180).unwrap();
        let heatmap = aggregate(&week(), TimezoneMode::Utc, offset, &samples);

        assert_eq!(heatmap.grid.get(23, 1), Some(4));
    }

    #[test]
    fn test_local_mode_shifts_hour_and_day() {
        // 23:00Z on Jan 3 is 01:00 on Jan 4 at UTC+2
        let offset = offset_from_minutes(120).unwrap();
        let samples = [WeeklySample::new(7, 23, 3, 1, 2023)];
        let heatmap = aggregate(&week(), TimezoneMode::Local, offset, &samples);

        let keys = heatmap.grid.column_keys();
        let col = keys
            .iter()
            .position(|k| k == "2023-01-04T21:59:59.999Z")
            .unwrap();
        assert_eq!(heatmap.grid.get(1, col), Some(7));
        assert_eq!(heatmap.stats.accepted, 1);
    }

    #[test]
    fn test_local_mode_skips_period_end() {
        let offset = offset_from_minutes(0).unwrap();
        let samples = [WeeklySample::new(9, 0, 8, 1, 2023)];
        let heatmap = aggregate(&week(), TimezoneMode::Local, offset, &samples);

        assert_eq!(heatmap.grid.total(), 0);
        assert_eq!(heatmap.stats.boundary_skipped, 1);
    }

    #[test]
    fn test_local_mode_skips_first_day_when_it_starts_the_period() {
        let offset = offset_from_minutes(60).unwrap();
        // Period starts at local midnight of Jan 1 (23:00Z Dec 31)
        let period = Period::new(
            Utc.with_ymd_and_hms(2022, 12, 31, 23, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 1, 7, 23, 0, 0).unwrap(),
        );
        let samples = [
            WeeklySample::new(3, 10, 1, 1, 2023),
            WeeklySample::new(4, 10, 2, 1, 2023),
        ];
        let heatmap = aggregate(&period, TimezoneMode::Local, offset, &samples);

        assert_eq!(heatmap.stats.boundary_skipped, 1);
        assert_eq!(heatmap.stats.accepted, 1);
        assert_eq!(heatmap.grid.total(), 4);
    }

    #[test]
    fn test_utc_mode_never_skips_boundaries() {
        let samples = [
            WeeklySample::new(1, 0, 1, 1, 2023),
            WeeklySample::new(1, 0, 8, 1, 2023),
        ];
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &samples);

        assert_eq!(heatmap.stats.boundary_skipped, 0);
        assert_eq!(heatmap.grid.total(), 2);
    }

    #[test]
    fn test_out_of_range_and_malformed_are_counted() {
        let samples = [
            WeeklySample::new(5, 3, 20, 1, 2023),
            WeeklySample::new(5, 3, 31, 2, 2023),
            WeeklySample::new(2, 3, 2, 1, 2023),
        ];
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &samples);

        assert_eq!(heatmap.stats.out_of_range, 1);
        assert_eq!(heatmap.stats.malformed, 1);
        assert_eq!(heatmap.stats.accepted, 1);
        assert_eq!(heatmap.stats.total(), 3);
        assert_eq!(heatmap.grid.total(), 2);
    }

    #[test]
    fn test_grid_total_matches_accepted_users() {
        let offset = offset_from_minutes(-240).unwrap();
        let samples: Vec<WeeklySample> = (1..=8)
            .flat_map(|day| (0..24).map(move |hour| WeeklySample::new(u64::from(hour) + 1, hour, day, 1, 2023)))
            .collect();

        for mode in [TimezoneMode::Utc, TimezoneMode::Local] {
            let heatmap = aggregate(&week(), mode, offset, &samples);
            let zone = mode.zone(offset);
            let expected: u64 = samples
                .iter()
                .filter(|s| {
                    let instant = s.instant().unwrap();
                    let skipped = mode == TimezoneMode::Local
                        && (instant == week().end
                            || start_of_day(instant, zone) == Some(week().start));
                    !skipped
                        && end_of_day(instant, zone)
                            .and_then(|key| heatmap.grid.column_index(key))
                            .is_some()
                })
                .map(|s| s.users)
                .sum();

            assert_eq!(heatmap.grid.total(), expected);
            assert_eq!(heatmap.stats.total(), samples.len());
        }
    }

    #[test]
    fn test_rows_shape() {
        let samples = [WeeklySample::new(5, 14, 3, 1, 2023)];
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &samples);
        let rows = heatmap.grid.rows();

        assert_eq!(rows[14].hour, "14");
        let json = serde_json::to_value(&rows[14]).unwrap();
        assert_eq!(json["hour"], "14");
        assert_eq!(json["2023-01-03T23:59:59.999Z"], 5);
        assert_eq!(json["2023-01-04T23:59:59.999Z"], 0);
    }

    #[test]
    fn test_cell_sums_saturate() {
        let samples = [
            WeeklySample::new(u64::MAX, 14, 3, 1, 2023),
            WeeklySample::new(1, 14, 3, 1, 2023),
            WeeklySample::new(7, 9, 4, 1, 2023),
        ];
        let heatmap = aggregate(&week(), TimezoneMode::Utc, utc_zone(), &samples);

        assert_eq!(heatmap.grid.get(14, 2), Some(u64::MAX));
        assert_eq!(heatmap.grid.total(), u64::MAX);
        assert_eq!(heatmap.stats.accepted, 3);
    }

    #[rstest]
    #[case(TimezoneMode::Utc, 0)]
    #[case(TimezoneMode::Local, 60)]
    #[case(TimezoneMode::Local, -60)]
    fn test_last_calendar_day_is_malformed(#[case] mode: TimezoneMode, #[case] minutes: i32) {
        let samples = [
            WeeklySample::new(1, 23, 31, 12, 262142),
            WeeklySample::new(2, 10, 2, 1, 2023),
        ];
        let offset = offset_from_minutes(minutes).unwrap();
        let heatmap = aggregate(&week(), mode, offset, &samples);

        assert_eq!(heatmap.stats.malformed, 1);
        assert_eq!(heatmap.stats.accepted, 1);
        assert_eq!(heatmap.grid.total(), 2);
    }

    #[test]
    fn test_add_rejects_unknown_cells() {
        let mut grid = BucketGrid::new(vec![utc(2023, 1, 1, 0)]);
        assert!(!grid.add(24, utc(2023, 1, 1, 0), 1));
        assert!(!grid.add(0, utc(2023, 1, 2, 0), 1));
        assert!(grid.add(0, utc(2023, 1, 1, 0), 1));
        assert_eq!(grid.row(0), Some(&[1][..]));
    }
}
