//! Core library modules for timecard.
//!
//! - **Domain**: sessions, rest windows, the reference clock, identities
//! - **Calculation**: worked-time aggregation and settlement summaries
//! - **Control**: the tracker that runs each user action against a store
//! - **Infrastructure**: configuration, data storage, secrets, messaging
//! - **User Interface**: formatting and table rendering
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::db::sessions::Sessions;
//! use timecard::libs::{config::Config, tracker::Tracker};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let mut tracker = Tracker::from_config(Sessions::new()?, &config, None)?;
//! let report = tracker.month(2025, 6).await?;
//! println!("{}", report.total);
//! # Ok(())
//! # }
//! ```

pub mod calculator;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod entry;
pub mod error;
pub mod formatter;
pub mod identity;
pub mod messages;
pub mod rest_span;
pub mod secret;
pub mod session;
pub mod store;
pub mod tracker;
pub mod view;
