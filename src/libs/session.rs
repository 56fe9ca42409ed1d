//! Work session records and per-session worked time.
//!
//! A [`WorkSession`] moves through three states, one way only:
//!
//! ```text
//! Open (end = None) ──clock-out──▶ Closed (end set) ──settle──▶ Settled (paid)
//! ```
//!
//! Instants are stored in UTC. Wall-clock interpretation is left to
//! [`ReferenceClock`](crate::libs::clock::ReferenceClock).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state derived from a session's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
    Settled,
}

/// One clock-in/clock-out interval belonging to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
    pub id: i64,
    pub user_id: String,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_minutes: i64,
    #[serde(default)]
    pub paid: bool,
}

impl WorkSession {
    pub fn state(&self) -> SessionState {
        match (self.end, self.paid) {
            (None, _) => SessionState::Open,
            (Some(_), false) => SessionState::Closed,
            (Some(_), true) => SessionState::Settled,
        }
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Whole minutes between start and end, before the break is deducted.
    ///
    /// Returns `None` for an open session. Negative when the end precedes the
    /// start; callers that aggregate floor the final value at zero.
    pub fn raw_minutes(&self) -> Option<i64> {
        self.end.map(|end| interval_minutes(self.start, end))
    }

    /// Minutes of work this session contributes to any aggregate.
    ///
    /// Open sessions contribute nothing. Closed sessions contribute
    /// `max(0, raw - break_minutes)`.
    pub fn worked_minutes(&self) -> i64 {
        match self.raw_minutes() {
            Some(raw) => (raw - self.break_minutes).max(0),
            None => 0,
        }
    }
}

/// Floor of the interval length in minutes.
///
/// `num_minutes` truncates toward zero; flooring matters only for negative
/// intervals, which are kept negative so that they floor to zero later.
pub fn interval_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds().div_euclid(60_000)
}

/// Fields supplied when a session is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSession {
    pub user_id: String,
    pub start: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    pub break_minutes: i64,
}

impl NewSession {
    /// A clock-in: start now, no end.
    pub fn open(user_id: &str, start: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_owned(),
            start,
            end: None,
            break_minutes: 0,
        }
    }

    /// A back-filled session with both ends known.
    pub fn closed(user_id: &str, start: DateTime<Utc>, end: DateTime<Utc>, break_minutes: i64) -> Self {
        Self {
            user_id: user_id.to_owned(),
            start,
            end: Some(end),
            break_minutes,
        }
    }
}

/// Partial update; `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid: Option<bool>,
}

impl SessionPatch {
    pub fn close(end: DateTime<Utc>, break_minutes: i64) -> Self {
        Self {
            end: Some(end),
            break_minutes: Some(break_minutes),
            paid: None,
        }
    }

    pub fn settle() -> Self {
        Self {
            paid: Some(true),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end.is_none() && self.break_minutes.is_none() && self.paid.is_none()
    }
}
