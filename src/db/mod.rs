//! Database layer for timecard.
//!
//! Sessions are kept in a single SQLite file in the platform data
//! directory. The schema is versioned through [`migrations`], which run
//! automatically whenever a connection is opened.

pub mod db;
pub mod migrations;
pub mod sessions;
