#[derive(Debug, Clone)]
pub enum Message {
    // === CLOCK MESSAGES ===
    ClockedIn { user: String, time: String },
    ClockedOut { user: String, time: String, worked: String },
    NothingOpen(String), // user
    BreakDeducted { minutes: i64, span: String },
    OpenSessionMarker,

    // === MANUAL ENTRY MESSAGES ===
    ManualEntryAdded { id: i64, date: String },

    // === MONTH SUMMARY MESSAGES ===
    MonthHeader { user: String, month: String },
    MonthTotal(String),
    NoSessionsForMonth(String),
    InvalidMonth(String),

    // === SETTLEMENT MESSAGES ===
    SettlementHeader { user: String, from: String, to: String },
    NothingToSettle,
    ConfirmSettlement(usize),
    SettlementCompleted(usize),
    SettlementCancelled,
    SettleDateInFuture(String),

    // === IDENTITY MESSAGES ===
    IdentitiesHeader,
    IdentitySwitched(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleStore,
    ConfigModulePayroll,
    ApiKeyStored,

    // === PROMPTS ===
    PromptSelectBackend,
    PromptStoreUrl,
    PromptStoreTable,
    PromptStoreApiKey,
    PromptUpdateApiKey,
    PromptHourlyRate,
    PromptDefaultBreak,
    PromptSelectIdentity,
    PromptBreakMinutes(String), // span

    // === STORE / DATABASE MESSAGES ===
    StoreFailed(String),
    DatabaseUpToDate,
    RunningMigration(u32, String),
    MigrationFailed(u32, String),
}
