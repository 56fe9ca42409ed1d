//! Display formatting for sessions and durations.
//!
//! Everything the terminal shows is rendered through here so that times are
//! always read in the reference timezone and durations always look the same.
//!
//! ## Format Specifications
//!
//! - Durations are "HH:MM", hours zero-padded to at least two digits.
//! - Negative durations are shown as "00:00".
//! - Times of day are "HH:MM" in the reference zone; a missing end is "-".
//! - A session reads "MM/DD HH:MM - HH:MM", with a marker instead of the end
//!   while it is still open.
//!
//! ## Examples
//!
//! ```rust
//! use timecard::libs::formatter::format_minutes;
//!
//! assert_eq!(format_minutes(90), "01:30");
//! assert_eq!(format_minutes(-5), "00:00");
//! ```

use crate::libs::clock::ReferenceClock;
use crate::libs::messages::Message;
use crate::libs::session::{SessionState, WorkSession};
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";
const LINE_DATE_FORMAT: &str = "%m/%d";
const NO_VALUE: &str = "-";

/// A session pre-rendered for a table row.
///
/// All values are strings so the row can be handed straight to the table
/// renderer or serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedSession {
    pub id: i64,
    /// Reference-zone calendar day the session started on.
    pub date: String,
    pub start: String,
    /// "-" while the session is still open.
    pub end: String,
    pub break_time: String,
    /// Worked time after the break; "-" while open.
    pub worked: String,
    pub state: String,
    /// One-line rendering, see [`session_line`].
    pub line: String,
}

impl FormattedSession {
    pub fn new(clock: &ReferenceClock, session: &WorkSession) -> Self {
        let end = session
            .end
            .map(|end| clock.format(end, TIME_FORMAT))
            .unwrap_or_else(|| NO_VALUE.to_string());
        let worked = if session.is_open() {
            NO_VALUE.to_string()
        } else {
            format_minutes(session.worked_minutes())
        };

        Self {
            id: session.id,
            date: clock.format(session.start, DATE_FORMAT),
            start: clock.format(session.start, TIME_FORMAT),
            end,
            break_time: format_minutes(session.break_minutes),
            worked,
            state: state_label(session.state()).to_string(),
            line: session_line(clock, session),
        }
    }
}

pub fn state_label(state: SessionState) -> &'static str {
    match state {
        SessionState::Open => "open",
        SessionState::Closed => "closed",
        SessionState::Settled => "paid",
    }
}

/// "MM/DD HH:MM - HH:MM" in the reference zone.
pub fn session_line(clock: &ReferenceClock, session: &WorkSession) -> String {
    let end = match session.end {
        Some(end) => clock.format(end, TIME_FORMAT),
        None => Message::OpenSessionMarker.to_string(),
    };
    format!(
        "{} {} - {}",
        clock.format(session.start, LINE_DATE_FORMAT),
        clock.format(session.start, TIME_FORMAT),
        end
    )
}

/// Formats a minute count as "HH:MM". Negative input renders as "00:00".
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Formats a monetary amount with two decimals.
pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}
