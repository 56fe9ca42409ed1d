//! Error types shared by the store backends and the tracker.
//!
//! Store failures are kept apart from input failures so that the command
//! layer can tell "the operation did not happen" from "the operation was
//! never attempted".

use thiserror::Error;

/// Failure talking to a session store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode store response: {0}")]
    Decode(String),

    #[error("Store did not return the id of the inserted session")]
    MissingId,

    #[error("Store is not configured: {0}")]
    Config(String),
}

/// Failure of a tracker operation.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Session end is earlier than its start")]
    EndBeforeStart,

    #[error("Break of {break_minutes} min exceeds the {interval_minutes} min session")]
    BreakExceedsInterval { break_minutes: i64, interval_minutes: i64 },

    #[error("Unknown identity '{0}'")]
    UnknownIdentity(String),

    #[error("Local time {0} does not exist in the reference timezone")]
    NonexistentLocalTime(String),
}
