//! Back-filled sessions typed in by the user.
//!
//! Everything is validated here, before the store is contacted.

use crate::libs::clock::ReferenceClock;
use crate::libs::error::TrackerError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Raw manual-entry fields as the user supplied them.
#[derive(Debug, Clone, Default)]
pub struct ManualEntry {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub break_minutes: Option<i64>,
    /// The end time belongs to the day after `date`.
    pub overnight: bool,
}

/// A manual entry resolved to instants.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub break_minutes: Option<i64>,
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, TrackerError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(TrackerError::MissingInput(name)),
    }
}

pub fn parse_date(value: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| TrackerError::InvalidInput(format!("'{}' is not a date (YYYY-MM-DD)", value)))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, TrackerError> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
        .ok_or_else(|| TrackerError::InvalidInput(format!("'{}' is not a time (HH:MM)", value)))
}

impl ManualEntry {
    /// Resolves the entry in the reference timezone.
    ///
    /// Rejects missing fields, unparsable values, dates after `today`,
    /// negative breaks and an end earlier than the start.
    pub fn resolve(&self, clock: &ReferenceClock, today: NaiveDate) -> Result<ResolvedEntry, TrackerError> {
        let date = parse_date(required(&self.date, "date")?)?;
        let start_time = parse_time(required(&self.start, "start time")?)?;
        let end_time = parse_time(required(&self.end, "end time")?)?;

        if date > today {
            return Err(TrackerError::InvalidInput(format!("{} is in the future", date)));
        }
        if let Some(minutes) = self.break_minutes {
            if minutes < 0 {
                return Err(TrackerError::InvalidInput("break minutes must not be negative".to_string()));
            }
        }

        let end_date = if self.overnight { date + Duration::days(1) } else { date };
        let start = clock
            .instant_at(date, start_time)
            .ok_or_else(|| TrackerError::NonexistentLocalTime(format!("{} {}", date, start_time)))?;
        let end = clock
            .instant_at(end_date, end_time)
            .ok_or_else(|| TrackerError::NonexistentLocalTime(format!("{} {}", end_date, end_time)))?;

        if end < start {
            return Err(TrackerError::EndBeforeStart);
        }

        Ok(ResolvedEntry {
            date,
            start,
            end,
            break_minutes: self.break_minutes,
        })
    }
}
