use super::{open_tracker, PromptBreak};
use crate::{
    libs::{calculator::WorkedTotal, config::Config, messages::Message, tracker::ClockOut},
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct EndArgs {
    /// Identity to clock out instead of the active one
    #[arg(short, long)]
    user: Option<String>,

    /// Break minutes to deduct, skipping the rest-window prompt
    #[arg(short, long = "break")]
    break_minutes: Option<i64>,
}

pub async fn cmd(args: EndArgs) -> Result<()> {
    let config = Config::load()?;
    let mut tracker = open_tracker(&config, args.user.as_deref())?;
    let mut policy = PromptBreak::new(args.break_minutes, config.default_break_minutes);

    let now = Utc::now();
    match tracker.clock_out(now, &mut policy).await? {
        ClockOut::NothingOpen => {
            msg_info!(Message::NothingOpen(tracker.user_id().to_string()));
        }
        ClockOut::Closed(session) => {
            if let (Some(span), true) = (policy.overlapped(), session.break_minutes > 0) {
                msg_info!(Message::BreakDeducted {
                    minutes: session.break_minutes,
                    span: span.to_string(),
                });
            }
            msg_success!(Message::ClockedOut {
                user: tracker.user_id().to_string(),
                time: tracker.clock().format(now, "%Y-%m-%d %H:%M"),
                worked: WorkedTotal::from_minutes(session.worked_minutes()).to_string(),
            });
        }
    }

    Ok(())
}
