//! Daily rest windows and the overlap check used to ask for break time.
//!
//! A rest span is a same-day wall-clock window in the reference timezone.
//! A session overlapping one is a candidate for a break deduction; what to
//! deduct is up to the caller.

use crate::libs::clock::ReferenceClock;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestSpan {
    pub start_hour: u32,
    pub start_minute: u32,
    pub end_hour: u32,
    pub end_minute: u32,
}

impl RestSpan {
    pub const fn new(start_hour: u32, start_minute: u32, end_hour: u32, end_minute: u32) -> Self {
        Self {
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        }
    }

    /// Lunch and dinner.
    pub fn defaults() -> Vec<RestSpan> {
        vec![RestSpan::new(11, 30, 13, 30), RestSpan::new(17, 0, 19, 0)]
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.start_hour, self.start_minute, 0)
    }

    pub fn end_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.end_hour, self.end_minute, 0)
    }

    pub fn is_valid(&self) -> bool {
        matches!((self.start_time(), self.end_time()), (Some(s), Some(e)) if s < e)
    }

    /// The window's instants on the reference-zone date of `anchor`.
    ///
    /// `None` when the span is malformed or a boundary falls in a DST gap.
    pub fn window_on(&self, clock: &ReferenceClock, anchor: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if !self.is_valid() {
            return None;
        }
        let date = clock.date_of(anchor);
        let rest_start = clock.instant_at(date, self.start_time()?)?;
        let rest_end = clock.instant_at(date, self.end_time()?)?;
        Some((rest_start, rest_end))
    }
}

impl fmt::Display for RestSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start_hour, self.start_minute, self.end_hour, self.end_minute
        )
    }
}

/// First span, in configured order, that the session `(start, end)`
/// strictly overlaps.
///
/// Windows are built on `start`'s calendar date. Touching a window at
/// either boundary is not an overlap.
pub fn detect_rest_overlap<'a>(
    clock: &ReferenceClock,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    spans: &'a [RestSpan],
) -> Option<&'a RestSpan> {
    spans.iter().find(|span| match span.window_on(clock, start) {
        Some((rest_start, rest_end)) => start < rest_end && end > rest_start,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn jst(h: u32, m: u32) -> DateTime<Utc> {
        let clock = ReferenceClock::default();
        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        clock.instant_at(date, NaiveTime::from_hms_opt(h, m, 0).unwrap()).unwrap()
    }

    #[test]
    fn test_morning_session_has_no_overlap() {
        let spans = RestSpan::defaults();
        let hit = detect_rest_overlap(&ReferenceClock::default(), jst(9, 0), jst(10, 0), &spans);
        assert!(hit.is_none());
    }

    #[test]
    fn test_session_spanning_lunch_matches_lunch() {
        let spans = RestSpan::defaults();
        let hit = detect_rest_overlap(&ReferenceClock::default(), jst(11, 0), jst(14, 0), &spans);
        assert_eq!(hit, Some(&RestSpan::new(11, 30, 13, 30)));
    }

    #[test]
    fn test_touching_the_boundary_is_not_overlap() {
        let spans = RestSpan::defaults();
        let clock = ReferenceClock::default();
        assert!(detect_rest_overlap(&clock, jst(13, 30), jst(14, 0), &spans).is_none());
        assert!(detect_rest_overlap(&clock, jst(10, 0), jst(11, 30), &spans).is_none());
    }

    #[test]
    fn test_first_configured_span_wins() {
        let spans = RestSpan::defaults();
        let hit = detect_rest_overlap(&ReferenceClock::default(), jst(11, 0), jst(20, 0), &spans);
        assert_eq!(hit, Some(&spans[0]));
    }

    #[test]
    fn test_dinner_overlap() {
        let spans = RestSpan::defaults();
        let hit = detect_rest_overlap(&ReferenceClock::default(), jst(18, 30), jst(22, 0), &spans);
        assert_eq!(hit, Some(&RestSpan::new(17, 0, 19, 0)));
    }

    #[test]
    fn test_malformed_span_never_matches() {
        let spans = vec![RestSpan::new(25, 0, 26, 0)];
        assert!(!spans[0].is_valid());
        assert!(detect_rest_overlap(&ReferenceClock::default(), jst(0, 0), jst(23, 0), &spans).is_none());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(RestSpan::new(11, 30, 13, 30).to_string(), "11:30-13:30");
        assert_eq!(RestSpan::new(17, 0, 19, 0).to_string(), "17:00-19:00");
    }

    #[test]
    fn test_inverted_span_never_matches() {
        let spans = vec![RestSpan::new(13, 30, 11, 30)];
        assert!(detect_rest_overlap(&ReferenceClock::default(), jst(9, 0), jst(18, 0), &spans).is_none());
    }
}
