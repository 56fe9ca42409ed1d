use super::open_tracker;
use crate::{
    libs::{config::Config, entry::parse_date, error::TrackerError, messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct SettleArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(short, long)]
    from: String,

    /// Last day of the range (YYYY-MM-DD), no later than today
    #[arg(short, long)]
    to: String,

    /// Hourly rate; the configured rate when omitted
    #[arg(short, long)]
    rate: Option<f64>,

    /// Mark the sessions paid without asking
    #[arg(short, long)]
    yes: bool,

    /// Identity to settle instead of the active one
    #[arg(short, long)]
    user: Option<String>,
}

pub async fn cmd(args: SettleArgs) -> Result<()> {
    let config = Config::load()?;
    let clock = config.clock();

    let from = parse_date(&args.from)?;
    let to = parse_date(&args.to)?;
    if to > clock.today() {
        msg_bail_anyhow!(Message::SettleDateInFuture(args.to));
    }
    if from > to {
        return Err(TrackerError::InvalidInput(format!("{} is after {}", from, to)).into());
    }

    let mut tracker = open_tracker(&config, args.user.as_deref())?;
    let rate = args.rate.unwrap_or(config.hourly_rate);
    let summary = tracker.settlement_preview(from, to, rate).await?;

    msg_print!(
        Message::SettlementHeader {
            user: tracker.user_id().to_string(),
            from: args.from,
            to: args.to,
        },
        true
    );
    View::settlement(&summary)?;

    if summary.session_ids.is_empty() {
        msg_info!(Message::NothingToSettle);
        return Ok(());
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmSettlement(summary.session_ids.len()).to_string())
            .default(false)
            .interact()?;
    if !confirmed {
        msg_info!(Message::SettlementCancelled);
        return Ok(());
    }

    let count = tracker.settle(&summary).await?;
    msg_success!(Message::SettlementCompleted(count));
    Ok(())
}
