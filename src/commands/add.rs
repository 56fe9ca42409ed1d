use super::{open_tracker, PromptBreak};
use crate::{
    libs::{config::Config, entry::ManualEntry, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Day the session started on (YYYY-MM-DD)
    #[arg(short, long)]
    date: Option<String>,

    /// Start time (HH:MM)
    #[arg(short, long)]
    start: Option<String>,

    /// End time (HH:MM)
    #[arg(short, long)]
    end: Option<String>,

    /// Break minutes to deduct, skipping the rest-window prompt
    #[arg(short, long = "break")]
    break_minutes: Option<i64>,

    /// The end time falls on the following day
    #[arg(long)]
    overnight: bool,

    /// Identity to record the session for instead of the active one
    #[arg(short, long)]
    user: Option<String>,
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config, args.user.as_deref())?;

    let entry = ManualEntry {
        date: args.date,
        start: args.start,
        end: args.end,
        break_minutes: args.break_minutes,
        overnight: args.overnight,
    };
    let mut policy = PromptBreak::new(None, config.default_break_minutes);
    let today = tracker.clock().today();
    let id = tracker.add_manual(&entry, today, &mut policy).await?;

    msg_success!(Message::ManualEntryAdded {
        id,
        date: entry.date.unwrap_or_default(),
    });
    Ok(())
}
