//! # Timecard - work-session time tracking
//!
//! A command-line utility for clocking in and out, back-filling sessions,
//! summarizing monthly worked time and settling pay periods.
//!
//! ## Features
//!
//! - **Clock In/Out**: Open and close work sessions, with break deduction
//!   when a session overlaps a rest window
//! - **Manual Entries**: Back-fill past sessions, including overnight ones
//! - **Monthly Summary**: Worked time per day and per month
//! - **Settlement**: Wage estimate for a date range and marking it paid
//! - **Storage**: Local SQLite file or a hosted PostgREST table
//!
//! All calendar arithmetic happens in one reference timezone
//! (`Asia/Tokyo`), whatever the machine's zone or the user's settings.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
