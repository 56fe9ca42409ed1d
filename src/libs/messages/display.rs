//! Display implementation for application messages.
//!
//! All user-facing text lives here, so wording stays consistent between
//! commands and the message macros.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let text = match self {
            // === CLOCK MESSAGES ===
            Message::ClockedIn { user, time } => format!("Clocked in {} at {}", user, time),
            Message::ClockedOut { user, time, worked } => format!("Clocked out {} at {} ({} worked)", user, time, worked),
            Message::NothingOpen(user) => format!("No open session for {}, nothing to clock out", user),
            Message::BreakDeducted { minutes, span } => format!("Deducted a {} min break for rest window {}", minutes, span),
            Message::OpenSessionMarker => "(not clocked out)".to_string(),

            // === MANUAL ENTRY MESSAGES ===
            Message::ManualEntryAdded { id, date } => format!("Added session #{} for {}", id, date),

            // === MONTH SUMMARY MESSAGES ===
            Message::MonthHeader { user, month } => format!("Sessions of {} for {}", user, month),
            Message::MonthTotal(total) => format!("Total worked this month: {}", total),
            Message::NoSessionsForMonth(month) => format!("No sessions recorded for {}", month),
            Message::InvalidMonth(month) => format!("Invalid month '{}', expected YYYY-MM", month),

            // === SETTLEMENT MESSAGES ===
            Message::SettlementHeader { user, from, to } => format!("Settlement for {} from {} to {}", user, from, to),
            Message::NothingToSettle => "No closed sessions in this range".to_string(),
            Message::ConfirmSettlement(count) => format!("Mark {} session(s) as paid?", count),
            Message::SettlementCompleted(count) => format!("Marked {} session(s) as paid", count),
            Message::SettlementCancelled => "Settlement cancelled".to_string(),
            Message::SettleDateInFuture(date) => format!("Cannot settle up to {}, it is later than today", date),

            // === IDENTITY MESSAGES ===
            Message::IdentitiesHeader => "Available identities:".to_string(),
            Message::IdentitySwitched(token) => format!("Active identity is now '{}'", token),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleStore => "Session store".to_string(),
            Message::ConfigModulePayroll => "Payroll".to_string(),
            Message::ApiKeyStored => "API key stored".to_string(),

            // === PROMPTS ===
            Message::PromptSelectBackend => "Where should sessions be stored?".to_string(),
            Message::PromptStoreUrl => "Store URL".to_string(),
            Message::PromptStoreTable => "Table name".to_string(),
            Message::PromptStoreApiKey => "Enter the store API key".to_string(),
            Message::PromptUpdateApiKey => "Update the stored API key?".to_string(),
            Message::PromptHourlyRate => "Hourly rate".to_string(),
            Message::PromptDefaultBreak => "Default break in minutes".to_string(),
            Message::PromptSelectIdentity => "Active identity".to_string(),
            Message::PromptBreakMinutes(span) => format!("Session overlaps rest window {}. Break minutes", span),

            // === STORE / DATABASE MESSAGES ===
            Message::StoreFailed(error) => format!("Store operation failed: {}", error),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
        };
        write!(f, "{}", text)
    }
}
