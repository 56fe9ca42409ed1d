//! The application controller.
//!
//! A [`Tracker`] owns the state a user action needs (the store, the active
//! identity, the reference clock and the rest windows) and runs each action
//! to completion: at most a query and a write against the store, with the
//! calculator in between. A store failure aborts the action before anything
//! is written; nothing is retried.

use crate::libs::calculator::{aggregate_monthly, aggregate_range, daily_totals, DailySummary, RangeSummary, WorkedTotal};
use crate::libs::clock::ReferenceClock;
use crate::libs::config::Config;
use crate::libs::entry::ManualEntry;
use crate::libs::error::{StoreError, TrackerError};
use crate::libs::rest_span::{detect_rest_overlap, RestSpan};
use crate::libs::session::{interval_minutes, NewSession, SessionPatch, WorkSession};
use crate::libs::store::SessionStore;
use chrono::{DateTime, NaiveDate, Utc};

/// Decides how many break minutes to deduct from a session being closed.
///
/// `overlap` is the first rest window the session overlaps, if any.
pub trait BreakPolicy {
    fn break_for(&mut self, overlap: Option<&RestSpan>) -> Result<i64, TrackerError>;
}

/// Always the same amount, whether or not a rest window was hit.
pub struct FixedBreak(pub i64);

impl BreakPolicy for FixedBreak {
    fn break_for(&mut self, _overlap: Option<&RestSpan>) -> Result<i64, TrackerError> {
        Ok(self.0)
    }
}

/// Never deducts anything.
pub struct NoBreak;

impl BreakPolicy for NoBreak {
    fn break_for(&mut self, _overlap: Option<&RestSpan>) -> Result<i64, TrackerError> {
        Ok(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClockOut {
    /// The session that was closed, as stored.
    Closed(WorkSession),
    /// The user had no open session.
    NothingOpen,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthReport {
    pub year: i32,
    pub month: u32,
    pub sessions: Vec<WorkSession>,
    pub daily: Vec<DailySummary>,
    pub total: WorkedTotal,
}

/// Rejects breaks that are negative or longer than the session.
pub fn validate_break(start: DateTime<Utc>, end: DateTime<Utc>, break_minutes: i64) -> Result<(), TrackerError> {
    if break_minutes < 0 {
        return Err(TrackerError::InvalidInput("break minutes must not be negative".to_string()));
    }
    let interval = interval_minutes(start, end);
    if break_minutes > interval {
        return Err(TrackerError::BreakExceedsInterval {
            break_minutes,
            interval_minutes: interval,
        });
    }
    Ok(())
}

fn logged<T>(action: &str, result: Result<T, StoreError>) -> Result<T, TrackerError> {
    result.map_err(|error| {
        tracing::error!(action, %error, "store call failed");
        TrackerError::Store(error)
    })
}

pub struct Tracker<S: SessionStore> {
    store: S,
    clock: ReferenceClock,
    rest_spans: Vec<RestSpan>,
    user_id: String,
}

impl<S: SessionStore> Tracker<S> {
    pub fn new(store: S, clock: ReferenceClock, rest_spans: Vec<RestSpan>, user_id: &str) -> Self {
        Self {
            store,
            clock,
            rest_spans,
            user_id: user_id.to_owned(),
        }
    }

    /// Tracker for `requested` (or the active identity) using the clock and
    /// rest windows from `config`.
    pub fn from_config(store: S, config: &Config, requested: Option<&str>) -> Result<Self, TrackerError> {
        let identity = config.identity(requested)?;
        Ok(Self::new(store, config.clock(), config.rest_spans.clone(), &identity.token))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn clock(&self) -> &ReferenceClock {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn clock_in(&mut self, now: DateTime<Utc>) -> Result<i64, TrackerError> {
        let id = logged("clock in", self.store.insert(&NewSession::open(&self.user_id, now)).await)?;
        tracing::info!(id, user = %self.user_id, "clocked in");
        Ok(id)
    }

    /// Closes the user's most recent open session at `now`.
    pub async fn clock_out(&mut self, now: DateTime<Utc>, policy: &mut impl BreakPolicy) -> Result<ClockOut, TrackerError> {
        let open = logged("find open session", self.store.query_open_session(&self.user_id).await)?;
        let Some(mut session) = open else {
            tracing::debug!(user = %self.user_id, "no open session");
            return Ok(ClockOut::NothingOpen);
        };
        if now < session.start {
            return Err(TrackerError::EndBeforeStart);
        }

        let overlap = detect_rest_overlap(&self.clock, session.start, now, &self.rest_spans);
        let break_minutes = policy.break_for(overlap)?;
        validate_break(session.start, now, break_minutes)?;

        logged("clock out", self.store.update(session.id, &SessionPatch::close(now, break_minutes)).await)?;
        tracing::info!(id = session.id, break_minutes, "clocked out");

        session.end = Some(now);
        session.break_minutes = break_minutes;
        Ok(ClockOut::Closed(session))
    }

    /// Inserts a back-filled session. The policy is consulted only when
    /// the entry carries no break of its own.
    pub async fn add_manual(
        &mut self,
        entry: &ManualEntry,
        today: NaiveDate,
        policy: &mut impl BreakPolicy,
    ) -> Result<i64, TrackerError> {
        let resolved = entry.resolve(&self.clock, today)?;
        let break_minutes = match resolved.break_minutes {
            Some(minutes) => minutes,
            None => {
                let overlap = detect_rest_overlap(&self.clock, resolved.start, resolved.end, &self.rest_spans);
                policy.break_for(overlap)?
            }
        };
        validate_break(resolved.start, resolved.end, break_minutes)?;

        let session = NewSession::closed(&self.user_id, resolved.start, resolved.end, break_minutes);
        let id = logged("add manual session", self.store.insert(&session).await)?;
        tracing::info!(id, date = %resolved.date, "added manual session");
        Ok(id)
    }

    /// Sessions of the user starting in the given month, with totals.
    pub async fn month(&mut self, year: i32, month: u32) -> Result<MonthReport, TrackerError> {
        let (from, to) = self
            .clock
            .month_bounds(year, month)
            .ok_or_else(|| TrackerError::InvalidInput(format!("{}-{:02} is not a month", year, month)))?;
        let sessions = logged(
            "load month",
            self.store.query_by_user_and_range(&self.user_id, from, to).await,
        )?;

        Ok(MonthReport {
            year,
            month,
            total: aggregate_monthly(&self.clock, &sessions, year, month),
            daily: daily_totals(&self.clock, &sessions),
            sessions,
        })
    }

    /// Worked time and wage estimate over `[from, to]`, without writing.
    pub async fn settlement_preview(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
        hourly_rate: f64,
    ) -> Result<RangeSummary, TrackerError> {
        if from > to {
            return Ok(aggregate_range(&self.clock, &[], from, to, hourly_rate));
        }
        let (lower, upper) = (self.clock.start_of_day(from), self.clock.end_of_day(to));
        let sessions = logged(
            "load settlement range",
            self.store.query_by_user_and_range(&self.user_id, lower, upper).await,
        )?;
        Ok(aggregate_range(&self.clock, &sessions, from, to, hourly_rate))
    }

    /// Marks every session counted in `summary` as paid. Returns how many
    /// ids were sent to the store.
    pub async fn settle(&mut self, summary: &RangeSummary) -> Result<usize, TrackerError> {
        if summary.session_ids.is_empty() {
            return Ok(0);
        }
        logged(
            "settle",
            self.store.update_batch(&summary.session_ids, &SessionPatch::settle()).await,
        )?;
        tracing::info!(count = summary.session_ids.len(), "settled sessions");
        Ok(summary.session_ids.len())
    }
}
