//! Periods, timezone modes and the date columns of the heatmap.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, SecondsFormat, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::{HeatmapError, Result};

/// How sample hours are placed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimezoneMode {
    /// Calendar fields are UTC and days are UTC days
    #[default]
    Utc,
    /// Samples are shifted into the viewer's offset, days are local days
    Local,
}

impl TimezoneMode {
    /// The zone in which days and hours are read for this mode.
    pub fn zone(self, offset: FixedOffset) -> FixedOffset {
        match self {
            TimezoneMode::Utc => utc_zone(),
            TimezoneMode::Local => offset,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimezoneMode::Utc => "utc",
            TimezoneMode::Local => "local",
        }
    }
}

impl fmt::Display for TimezoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimezoneMode {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "utc" => Ok(TimezoneMode::Utc),
            "local" => Ok(TimezoneMode::Local),
            other => Err(HeatmapError::UnknownTimezone(other.to_string())),
        }
    }
}

pub(crate) fn utc_zone() -> FixedOffset {
    Utc.fix()
}

/// Build a fixed offset from minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or(HeatmapError::InvalidOffset(minutes))
}

/// Serialize an instant the way the dashboard keys its columns:
/// millisecond precision with a `Z` suffix.
pub fn iso_millis(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Map a wall-clock time in `zone` to the instant it denotes, `None` past
/// the representable range.
pub(crate) fn wall_clock_to_utc(
    naive: NaiveDateTime,
    zone: FixedOffset,
) -> Option<DateTime<Utc>> {
    naive
        .checked_sub_signed(Duration::seconds(i64::from(zone.local_minus_utc())))
        .map(|utc| utc.and_utc())
}

fn local_date(instant: DateTime<Utc>, zone: FixedOffset) -> NaiveDate {
    instant.with_timezone(&zone).date_naive()
}

/// First millisecond of the day containing `instant`, days read in `zone`.
///
/// `None` when the result falls outside chrono's calendar.
pub fn start_of_day(instant: DateTime<Utc>, zone: FixedOffset) -> Option<DateTime<Utc>> {
    wall_clock_to_utc(local_date(instant, zone).and_time(NaiveTime::MIN), zone)
}

/// Last millisecond (23:59:59.999) of the day containing `instant`.
pub fn end_of_day(instant: DateTime<Utc>, zone: FixedOffset) -> Option<DateTime<Utc>> {
    start_of_day(instant, zone)?
        .checked_add_signed(Duration::days(1))?
        .checked_sub_signed(Duration::milliseconds(1))
}

/// The `[start, end]` range selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Parse both bounds from ISO-8601 / RFC 3339 strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_instant("start", start)?,
            end: parse_instant("end", end)?,
        })
    }

    /// Whole days between start and end, truncated toward zero.
    pub fn day_span(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of date columns for the given mode.
    ///
    /// UTC mode includes the boundary day; local mode drops the partial
    /// first day. Negative spans give zero columns.
    pub fn column_count(&self, mode: TimezoneMode) -> usize {
        let span = self.day_span();
        let count = match mode {
            TimezoneMode::Utc => span + 1,
            TimezoneMode::Local => span - 1,
        };
        usize::try_from(count).unwrap_or(0)
    }

    /// End-of-day instants, one per column, ascending.
    ///
    /// Stops early at the end of chrono's calendar.
    pub fn column_keys(&self, mode: TimezoneMode, offset: FixedOffset) -> Vec<DateTime<Utc>> {
        let zone = mode.zone(offset);
        let Some(first) = end_of_day(self.start, zone) else {
            return Vec::new();
        };
        let skip = match mode {
            TimezoneMode::Utc => 0,
            TimezoneMode::Local => 1,
        };

        (0..self.column_count(mode) as i64)
            .map_while(|i| first.checked_add_signed(Duration::days(i + skip)))
            .collect()
    }

    /// Reject periods spanning more than `max_days` whole days.
    pub fn ensure_max_days(&self, max_days: i64) -> Result<()> {
        let days = self.day_span();
        if days > max_days {
            return Err(HeatmapError::PeriodTooLong { days, max_days });
        }
        Ok(())
    }

    pub fn start_iso(&self) -> String {
        iso_millis(self.start)
    }

    pub fn end_iso(&self) -> String {
        iso_millis(self.end)
    }
}

fn parse_instant(field: &'static str, value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| HeatmapError::InvalidInstant {
            field,
            value: value.to_string(),
        })
}

/// Ranges offered by the dashboard's period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PeriodPreset {
    #[default]
    #[serde(rename = "last 7 days")]
    LastSevenDays,
    #[serde(rename = "last 30 days")]
    LastThirtyDays,
    #[serde(rename = "last 90 days")]
    LastNinetyDays,
}

impl PeriodPreset {
    pub const ALL: [PeriodPreset; 3] = [
        PeriodPreset::LastSevenDays,
        PeriodPreset::LastThirtyDays,
        PeriodPreset::LastNinetyDays,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PeriodPreset::LastSevenDays => "last 7 days",
            PeriodPreset::LastThirtyDays => "last 30 days",
            PeriodPreset::LastNinetyDays => "last 90 days",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            PeriodPreset::LastSevenDays => 7,
            PeriodPreset::LastThirtyDays => 30,
            PeriodPreset::LastNinetyDays => 90,
        }
    }

    /// The period ending at the end of yesterday, days read in the mode's zone.
    pub fn range(
        self,
        now: DateTime<Utc>,
        mode: TimezoneMode,
        offset: FixedOffset,
    ) -> Result<Period> {
        let today = start_of_day(now, mode.zone(offset));
        let start = today.and_then(|t| t.checked_sub_signed(Duration::days(self.days())));
        let end = today.and_then(|t| t.checked_sub_signed(Duration::milliseconds(1)));
        match (start, end) {
            (Some(start), Some(end)) => Ok(Period { start, end }),
            _ => Err(HeatmapError::OutOfRange(iso_millis(now))),
        }
    }
}

impl FromStr for PeriodPreset {
    type Err = HeatmapError;

    /// Accepts the selector key (`last 7 days`) or its slug (`last-7-days`).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.replace(['-', '_'], " ");
        Self::ALL
            .into_iter()
            .find(|p| p.key() == normalized)
            .ok_or_else(|| HeatmapError::UnknownPreset(s.to_string()))
    }
}
