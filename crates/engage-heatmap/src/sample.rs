//! Weekly samples as reported by the users-by-time-of-the-day endpoint.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{HeatmapError, Result};
use crate::period::wall_clock_to_utc;

/// Active users counted during one calendar hour.
///
/// The calendar fields are UTC. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySample {
    pub users: u64,
    pub hour: u32,
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl WeeklySample {
    pub fn new(users: u64, hour: u32, day: u32, month: u32, year: i32) -> Self {
        Self {
            users,
            hour,
            day,
            month,
            year,
        }
    }

    /// The calendar hour as a wall-clock value, `None` if the fields do not
    /// name a real date and hour.
    pub fn naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?.and_hms_opt(self.hour, 0, 0)
    }

    /// The instant of this sample, reading the calendar fields as UTC.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.naive().map(|naive| naive.and_utc())
    }

    /// The instant of the calendar fields read as wall-clock time in `zone`.
    ///
    /// This is the reading used by the CSV export. `None` when the shift
    /// leaves chrono's calendar.
    pub fn wall_clock_instant(&self, zone: FixedOffset) -> Option<DateTime<Utc>> {
        self.naive().and_then(|naive| wall_clock_to_utc(naive, zone))
    }

    pub fn is_valid(&self) -> bool {
        self.naive().is_some()
    }

    /// Decode one sample, `None` when the record is malformed.
    pub fn from_value(value: &Value) -> Option<Self> {
        WeeklySample::deserialize(value)
            .ok()
            .filter(WeeklySample::is_valid)
    }
}

/// Samples decoded from a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSamples {
    pub samples: Vec<WeeklySample>,
    /// Records that could not be decoded and were dropped
    pub malformed: usize,
}

/// Decode every record that parses, counting the rest.
pub fn parse_samples(values: &[Value]) -> ParsedSamples {
    let mut parsed = ParsedSamples::default();
    for value in values {
        match WeeklySample::from_value(value) {
            Some(sample) => parsed.samples.push(sample),
            None => {
                tracing::debug!(record = %value, "skipping malformed sample");
                parsed.malformed += 1;
            }
        }
    }
    parsed
}

/// Decode the `week` array of a users-by-time-of-the-day response body.
pub fn parse_week(body: &Value) -> Result<ParsedSamples> {
    body.get("week")
        .and_then(Value::as_array)
        .map(|week| parse_samples(week))
        .ok_or(HeatmapError::MissingWeek)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::offset_from_minutes;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_instant_reads_fields_as_utc() {
        let sample = WeeklySample::new(5, 14, 3, 1, 2023);
        assert_eq!(
            sample.instant(),
            Some(Utc.with_ymd_and_hms(2023, 1, 3, 14, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_wall_clock_instant_applies_zone() {
        let sample = WeeklySample::new(5, 14, 3, 1, 2023);
        let zone = offset_from_minutes(120).unwrap();
        assert_eq!(
            sample.wall_clock_instant(zone),
            Some(Utc.with_ymd_and_hms(2023, 1, 3, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_invalid_calendar_fields() {
        assert!(!WeeklySample::new(1, 24, 3, 1, 2023).is_valid());
        assert!(!WeeklySample::new(1, 0, 30, 2, 2023).is_valid());
        assert!(!WeeklySample::new(1, 0, 1, 13, 2023).is_valid());
        assert!(!WeeklySample::new(1, 0, 0, 1, 2023).is_valid());
        assert!(WeeklySample::new(1, 23, 29, 2, 2024).is_valid());
    }

    #[test]
    fn test_parse_samples_skips_bad_records() {
        let values = vec![
            json!({ "users": 5, "hour": 14, "day": 3, "month": 1, "year": 2023 }),
            json!({ "users": -1, "hour": 14, "day": 3, "month": 1, "year": 2023 }),
            json!({ "users": 2, "hour": 30, "day": 3, "month": 1, "year": 2023 }),
            json!({ "users": 2, "day": 3, "month": 1, "year": 2023 }),
            json!("not a sample"),
            json!({ "users": 1, "hour": 0, "day": 4, "month": 1, "year": 2023, "extra": true }),
        ];

        let parsed = parse_samples(&values);
        assert_eq!(parsed.samples.len(), 2);
        assert_eq!(parsed.malformed, 4);
        assert_eq!(parsed.samples[0].users, 5);
    }

    #[test]
    fn test_parse_week_body() {
        let body = json!({
            "week": [{ "users": 3, "hour": 1, "day": 2, "month": 1, "year": 2023 }],
            "success": true
        });
        let parsed = parse_week(&body).unwrap();
        assert_eq!(parsed.samples, vec![WeeklySample::new(3, 1, 2, 1, 2023)]);
    }

    #[test]
    fn test_parse_week_requires_array() {
        assert!(matches!(
            parse_week(&json!({ "week": null })),
            Err(HeatmapError::MissingWeek)
        ));
        assert!(matches!(parse_week(&json!([])), Err(HeatmapError::MissingWeek)));
    }
}
