//! Aggregation of worked time over a month or a date range.
//!
//! All functions are pure: they read a snapshot of sessions and never touch
//! the store. Calendar boundaries come from the [`ReferenceClock`].

use crate::libs::clock::ReferenceClock;
use crate::libs::session::WorkSession;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A minute total split into hours and remaining minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkedTotal {
    pub hours: i64,
    pub minutes: i64,
}

impl WorkedTotal {
    pub fn from_minutes(total: i64) -> Self {
        Self {
            hours: total.div_euclid(60),
            minutes: total.rem_euclid(60),
        }
    }

    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }
}

impl fmt::Display for WorkedTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Result of aggregating a date range for settlement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RangeSummary {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub total: WorkedTotal,
    pub hourly_rate: f64,
    /// Whole hours times the hourly rate.
    pub wage: f64,
    /// Closed sessions counted in `total`, in input order.
    pub session_ids: Vec<i64>,
    /// How many of `session_ids` were already marked paid.
    pub already_paid: usize,
}

/// Worked minutes summed per reference-zone calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub minutes: i64,
}

fn sum_worked<'a>(sessions: impl Iterator<Item = &'a WorkSession>) -> i64 {
    sessions.map(WorkSession::worked_minutes).sum()
}

fn starts_within(session: &WorkSession, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    session.start >= from && session.start <= to
}

/// Worked time of sessions starting in the given calendar month.
///
/// An invalid month yields a zero total.
pub fn aggregate_monthly(clock: &ReferenceClock, sessions: &[WorkSession], year: i32, month: u32) -> WorkedTotal {
    let Some((from, to)) = clock.month_bounds(year, month) else {
        return WorkedTotal::default();
    };
    WorkedTotal::from_minutes(sum_worked(sessions.iter().filter(|s| starts_within(s, from, to))))
}

/// Worked time and wage estimate of sessions starting between the start of
/// `from` and the end of `to`, both days included.
pub fn aggregate_range(
    clock: &ReferenceClock,
    sessions: &[WorkSession],
    from: NaiveDate,
    to: NaiveDate,
    hourly_rate: f64,
) -> RangeSummary {
    let (lower, upper) = (clock.start_of_day(from), clock.end_of_day(to));
    let counted: Vec<&WorkSession> = sessions
        .iter()
        .filter(|s| starts_within(s, lower, upper))
        .collect();

    let total = WorkedTotal::from_minutes(sum_worked(counted.iter().copied()));
    RangeSummary {
        from: Some(from),
        to: Some(to),
        total,
        hourly_rate,
        wage: total.hours as f64 * hourly_rate,
        session_ids: counted.iter().filter(|s| !s.is_open()).map(|s| s.id).collect(),
        already_paid: counted.iter().filter(|s| !s.is_open() && s.paid).count(),
    }
}

/// Per-day totals in ascending date order. Days without closed sessions are
/// omitted.
pub fn daily_totals(clock: &ReferenceClock, sessions: &[WorkSession]) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for session in sessions.iter().filter(|s| !s.is_open()) {
        *days.entry(clock.date_of(session.start)).or_default() += session.worked_minutes();
    }
    days.into_iter().map(|(date, minutes)| DailySummary { date, minutes }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, TimeZone};

    fn at(clock: &ReferenceClock, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        clock
            .instant_at(NaiveDate::from_ymd_opt(y, mo, d).unwrap(), NaiveTime::from_hms_opt(h, mi, 0).unwrap())
            .unwrap()
    }

    fn closed(id: i64, start: DateTime<Utc>, minutes: i64, break_minutes: i64) -> WorkSession {
        WorkSession {
            id,
            user_id: "cat001".to_string(),
            start,
            end: Some(start + chrono::Duration::minutes(minutes)),
            break_minutes,
            paid: false,
        }
    }

    #[test]
    fn test_empty_month_is_zero() {
        let clock = ReferenceClock::default();
        assert_eq!(aggregate_monthly(&clock, &[], 2025, 6), WorkedTotal { hours: 0, minutes: 0 });
    }

    #[test]
    fn test_month_sums_only_that_month() {
        let clock = ReferenceClock::default();
        let sessions = vec![
            closed(1, at(&clock, 2025, 6, 2, 9, 0), 90, 0),
            closed(2, at(&clock, 2025, 6, 30, 22, 0), 45, 0),
            closed(3, at(&clock, 2025, 7, 1, 0, 10), 600, 0),
            closed(4, at(&clock, 2025, 5, 31, 23, 50), 600, 0),
        ];
        assert_eq!(aggregate_monthly(&clock, &sessions, 2025, 6), WorkedTotal { hours: 2, minutes: 15 });
    }

    #[test]
    fn test_month_uses_reference_zone() {
        let clock = ReferenceClock::default();
        // 00:30 on June 1st in Tokyo, still May 31st in UTC
        let start = Utc.with_ymd_and_hms(2025, 5, 31, 15, 30, 0).unwrap();
        let sessions = vec![closed(1, start, 60, 0)];
        assert_eq!(aggregate_monthly(&clock, &sessions, 2025, 6).total_minutes(), 60);
        assert_eq!(aggregate_monthly(&clock, &sessions, 2025, 5).total_minutes(), 0);
    }

    #[test]
    fn test_invalid_month_is_zero() {
        let clock = ReferenceClock::default();
        let sessions = vec![closed(1, at(&clock, 2025, 6, 2, 9, 0), 90, 0)];
        assert_eq!(aggregate_monthly(&clock, &sessions, 2025, 13), WorkedTotal::default());
    }

    #[test]
    fn test_range_includes_both_boundary_days() {
        let clock = ReferenceClock::default();
        let sessions = vec![
            closed(1, at(&clock, 2025, 6, 1, 0, 0), 60, 0),
            closed(2, at(&clock, 2025, 6, 3, 23, 59), 60, 0),
            closed(3, at(&clock, 2025, 6, 4, 0, 0), 60, 0),
        ];
        let from = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let summary = aggregate_range(&clock, &sessions, from, to, 45.0);
        assert_eq!(summary.total, WorkedTotal { hours: 2, minutes: 0 });
        assert_eq!(summary.session_ids, vec![1, 2]);
    }

    #[test]
    fn test_wage_uses_whole_hours() {
        let clock = ReferenceClock::default();
        let sessions = vec![closed(1, at(&clock, 2025, 6, 1, 9, 0), 150, 0)];
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let summary = aggregate_range(&clock, &sessions, day, day, 45.0);
        assert_eq!(summary.total, WorkedTotal { hours: 2, minutes: 30 });
        assert_eq!(summary.wage, 90.0);
    }

    #[test]
    fn test_paid_sessions_are_counted_and_reported() {
        let clock = ReferenceClock::default();
        let mut paid = closed(1, at(&clock, 2025, 6, 1, 9, 0), 120, 0);
        paid.paid = true;
        let sessions = vec![paid, closed(2, at(&clock, 2025, 6, 1, 14, 0), 60, 0)];
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let summary = aggregate_range(&clock, &sessions, day, day, 10.0);
        assert_eq!(summary.session_ids, vec![1, 2]);
        assert_eq!(summary.already_paid, 1);
        assert_eq!(summary.wage, 30.0);
    }

    #[test]
    fn test_open_sessions_are_not_settled() {
        let clock = ReferenceClock::default();
        let mut open = closed(7, at(&clock, 2025, 6, 1, 9, 0), 0, 0);
        open.end = None;
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let summary = aggregate_range(&clock, &[open], day, day, 10.0);
        assert!(summary.session_ids.is_empty());
        assert_eq!(summary.total.total_minutes(), 0);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let clock = ReferenceClock::default();
        let sessions = vec![closed(1, at(&clock, 2025, 6, 2, 9, 0), 60, 0)];
        let from = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let summary = aggregate_range(&clock, &sessions, from, to, 10.0);
        assert!(summary.session_ids.is_empty());
        assert_eq!(summary.wage, 0.0);
    }

    #[test]
    fn test_daily_totals_group_by_local_day() {
        let clock = ReferenceClock::default();
        let sessions = vec![
            closed(1, at(&clock, 2025, 6, 2, 9, 0), 120, 0),
            closed(2, at(&clock, 2025, 6, 2, 14, 0), 60, 30),
            closed(3, at(&clock, 2025, 6, 1, 9, 0), 60, 0),
        ];
        let days = daily_totals(&clock, &sessions);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(days[1].minutes, 150);
    }

    #[test]
    fn test_total_display() {
        assert_eq!(WorkedTotal::from_minutes(485).to_string(), "8h 5m");
    }
}
