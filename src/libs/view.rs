use super::calculator::{DailySummary, RangeSummary};
use super::clock::ReferenceClock;
use super::formatter::{format_minutes, format_money, FormattedSession, DATE_FORMAT};
use super::identity::Identity;
use super::session::WorkSession;
use anyhow::Result;
use prettytable::{format, row, Table};

pub struct View {}

impl View {
    pub fn sessions(clock: &ReferenceClock, sessions: &[WorkSession]) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.set_titles(row!["ID", "SESSION", "BREAK", "WORKED", "STATE"]);
        for session in sessions {
            let session = FormattedSession::new(clock, session);
            table.add_row(row![session.id, session.line, session.break_time, session.worked, session.state]);
        }
        table.printstd();

        Ok(())
    }

    pub fn daily(daily: &[DailySummary]) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        table.set_titles(row!["DATE", "WORKED"]);
        for day in daily {
            table.add_row(row![day.date.format(DATE_FORMAT), format_minutes(day.minutes)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn settlement(summary: &RangeSummary) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        let day = |date: Option<chrono::NaiveDate>| date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default();
        table.add_row(row!["From", day(summary.from)]);
        table.add_row(row!["To", day(summary.to)]);
        table.add_row(row!["Sessions", summary.session_ids.len()]);
        table.add_row(row!["Already paid", summary.already_paid]);
        table.add_row(row!["Worked", summary.total]);
        table.add_row(row!["Rate", format_money(summary.hourly_rate)]);
        table.add_row(row!["Wage", format_money(summary.wage)]);
        table.printstd();

        Ok(())
    }

    pub fn identities(identities: &[Identity], active: &str) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["", "TOKEN", "LABEL"]);
        for identity in identities {
            let marker = if identity.token == active { "*" } else { "" };
            table.add_row(row![marker, identity.token, identity.label]);
        }
        table.printstd();

        Ok(())
    }
}
