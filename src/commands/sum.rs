use super::open_tracker;
use crate::{
    libs::{config::Config, messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {
    /// Month to summarize (YYYY-MM); the current month when omitted
    #[arg(short, long)]
    month: Option<String>,

    /// Identity to summarize instead of the active one
    #[arg(short, long)]
    user: Option<String>,
}

/// Parses "YYYY-MM".
pub fn parse_month(value: &str) -> Option<(i32, u32)> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .ok()
        .map(|date| (date.year(), date.month()))
}

pub async fn cmd(args: SumArgs) -> Result<()> {
    let config = Config::load()?;
    let (year, month) = match args.month {
        Some(value) => match parse_month(&value) {
            Some(month) => month,
            None => msg_bail_anyhow!(Message::InvalidMonth(value)),
        },
        None => config.clock().current_month(),
    };

    let mut tracker = open_tracker(&config, args.user.as_deref())?;
    let report = tracker.month(year, month).await?;
    let label = format!("{}-{:02}", year, month);

    msg_print!(
        Message::MonthHeader {
            user: tracker.user_id().to_string(),
            month: label.clone(),
        },
        true
    );
    if report.sessions.is_empty() {
        msg_info!(Message::NoSessionsForMonth(label));
        return Ok(());
    }

    View::sessions(tracker.clock(), &report.sessions)?;
    View::daily(&report.daily)?;
    msg_print!(Message::MonthTotal(report.total.to_string()), true);

    Ok(())
}
