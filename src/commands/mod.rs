//! Command-line interface for timecard.
//!
//! Each subcommand lives in its own module with a clap `Args` struct and a
//! `cmd` function. Commands that touch sessions build a [`Tracker`] over
//! the configured [`Backend`] and report through the message macros.
//!
//! ## Commands
//!
//! - `init`: interactive configuration wizard
//! - `user`: list identities or switch the active one
//! - `start` / `in`: clock in now
//! - `end` / `out`: clock out now
//! - `add`: back-fill a past session
//! - `sum`: monthly session table and total
//! - `settle`: wage estimate for a range, then mark it paid

pub mod add;
pub mod end;
pub mod init;
pub mod settle;
pub mod start;
pub mod sum;
pub mod user;

use crate::libs::{
    config::Config,
    error::TrackerError,
    messages::Message,
    rest_span::RestSpan,
    store::Backend,
    tracker::{BreakPolicy, Tracker},
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List identities or switch the active one")]
    User(user::UserArgs),
    #[command(about = "Clock in now", visible_alias = "in")]
    Start(start::StartArgs),
    #[command(about = "Clock out now", visible_alias = "out")]
    End(end::EndArgs),
    #[command(about = "Add a past session by hand")]
    Add(add::AddArgs),
    #[command(about = "Show sessions and worked time for a month")]
    Sum(sum::SumArgs),
    #[command(about = "Estimate wages for a date range and mark it paid")]
    Settle(settle::SettleArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::User(args) => user::cmd(args),
            Commands::Start(args) => start::cmd(args).await,
            Commands::End(args) => end::cmd(args).await,
            Commands::Add(args) => add::cmd(args).await,
            Commands::Sum(args) => sum::cmd(args).await,
            Commands::Settle(args) => settle::cmd(args).await,
        }
    }
}

/// Tracker for `user` (or the active identity) over the configured store.
///
/// The identity is checked before the store is opened, so an unknown token
/// never prompts for an API key.
pub(crate) fn open_tracker(config: &Config, user: Option<&str>) -> Result<Tracker<Backend>> {
    config.identity(user)?;
    let backend = Backend::open(&config.store)?;
    Ok(Tracker::from_config(backend, config, user)?)
}

/// Break policy of the interactive commands.
///
/// An explicit `--break` value always wins. Otherwise the user is asked only
/// when the session overlaps a rest window, with `default` pre-filled.
pub struct PromptBreak {
    fixed: Option<i64>,
    default: i64,
    overlapped: Option<RestSpan>,
}

impl PromptBreak {
    pub fn new(fixed: Option<i64>, default: i64) -> Self {
        Self {
            fixed,
            default,
            overlapped: None,
        }
    }

    /// The rest window seen by the last decision, if any.
    pub fn overlapped(&self) -> Option<&RestSpan> {
        self.overlapped.as_ref()
    }
}

impl BreakPolicy for PromptBreak {
    fn break_for(&mut self, overlap: Option<&RestSpan>) -> Result<i64, TrackerError> {
        self.overlapped = overlap.copied();
        if let Some(minutes) = self.fixed {
            return Ok(minutes);
        }
        let Some(span) = overlap else {
            return Ok(0);
        };
        Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBreakMinutes(span.to_string()).to_string())
            .default(self.default)
            .validate_with(|minutes: &i64| if *minutes >= 0 { Ok(()) } else { Err("must not be negative") })
            .interact_text()
            .map_err(|e| TrackerError::InvalidInput(e.to_string()))
    }
}
