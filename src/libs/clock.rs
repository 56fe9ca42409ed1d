//! The single wall-clock conversion point for the whole application.
//!
//! Every instant is stored in UTC and every calendar question (which day,
//! which month, what time of day) is answered in one reference timezone,
//! `Asia/Tokyo`. All users share this clock regardless of where they are.

use crate::libs::error::TrackerError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceClock {
    tz: Tz,
}

impl Default for ReferenceClock {
    fn default() -> Self {
        Self { tz: chrono_tz::Asia::Tokyo }
    }
}

impl ReferenceClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a clock from an IANA zone name such as `Asia/Tokyo`.
    pub fn from_name(name: &str) -> Result<Self, TrackerError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| TrackerError::InvalidInput(format!("unknown timezone '{}'", name)))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Wall-clock reading of `instant` in the reference timezone.
    pub fn local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// Calendar date of `instant` in the reference timezone.
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date()
    }

    /// UTC instant of a wall-clock reading.
    ///
    /// Ambiguous readings (clocks turned back) resolve to the earlier
    /// instant. Readings inside a gap (clocks turned forward) do not exist
    /// and yield `None`.
    pub fn instant(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.tz.from_local_datetime(&local).earliest().map(|dt| dt.with_timezone(&Utc))
    }

    pub fn instant_at(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
        self.instant(date.and_time(time))
    }

    /// First instant of `date`.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        self.instant(midnight)
            // A DST jump at midnight starts the day an hour later
            .or_else(|| self.instant(midnight + Duration::hours(1)))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
    }

    /// Last representable instant of `date`.
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        match date.succ_opt() {
            Some(next) => self.start_of_day(next) - Duration::nanoseconds(1),
            None => DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Inclusive instant bounds of a calendar month, or `None` for an
    /// invalid year/month.
    pub fn month_bounds(&self, year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
        Some((self.start_of_day(first), self.end_of_day(last)))
    }

    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }

    pub fn current_month(&self) -> (i32, u32) {
        let today = self.today();
        (today.year(), today.month())
    }

    pub fn format(&self, instant: DateTime<Utc>, fmt: &str) -> String {
        instant.with_timezone(&self.tz).format(fmt).to_string()
    }
}
