use super::open_tracker;
use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Identity to clock in as instead of the active one
    #[arg(short, long)]
    user: Option<String>,
}

pub async fn cmd(args: StartArgs) -> Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config, args.user.as_deref())?;

    let now = Utc::now();
    tracker.clock_in(now).await?;

    msg_success!(Message::ClockedIn {
        user: tracker.user_id().to_string(),
        time: tracker.clock().format(now, "%Y-%m-%d %H:%M"),
    });
    Ok(())
}
