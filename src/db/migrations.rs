//! Versioned schema migrations for the local session database.
//!
//! Each migration runs inside the same transaction as the bookkeeping row
//! that records it, so a database is always at a well-defined version.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("timecard.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), timecard::libs::error::StoreError>(())
//! ```

use crate::libs::error::StoreError;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use rusqlite::{params, Connection, Transaction};

/// Bookkeeping table listing every applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Ordered registry of all schema changes.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: sessions table keyed by owner and start instant
        self.add_migration(1, "create_work_sessions", |tx| {
            tx.execute(
                r#"CREATE TABLE IF NOT EXISTS work_sessions (
                    id INTEGER PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    start TIMESTAMP NOT NULL,
                    "end" TIMESTAMP
                )"#,
                [],
            )?;
            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_work_sessions_user_start ON work_sessions(user_id, start)",
                [],
            )?;
            Ok(())
        });

        // Version 2: settlement flag
        self.add_migration(2, "add_paid_flag", |tx| {
            tx.execute("ALTER TABLE work_sessions ADD COLUMN paid BOOLEAN NOT NULL DEFAULT FALSE", [])?;
            Ok(())
        });

        // Version 3: break deduction recorded at clock-out
        self.add_migration(3, "add_break_minutes", |tx| {
            tx.execute(
                "ALTER TABLE work_sessions ADD COLUMN break_minutes INTEGER NOT NULL DEFAULT 0",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every migration newer than the database's current version.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<(), StoreError> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(StoreError::Migration(format!("{} ({}): {}", migration.name, migration.version, e)));
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32, StoreError> {
        // A missing bookkeeping table means nothing was applied yet
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .unwrap_or(Some(0));
        Ok(version.unwrap_or(0))
    }

    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool, StoreError> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM migrations WHERE version = ?1",
            params![version],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String)>, StoreError> {
        let mut stmt = conn.prepare("SELECT version, name FROM migrations ORDER BY version")?;
        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(history)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<(), StoreError> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32, StoreError> {
    MigrationManager::new().get_current_version(conn)
}

pub fn needs_migration(conn: &Connection) -> Result<bool, StoreError> {
    let manager = MigrationManager::new();
    Ok(manager.get_current_version(conn)? < manager.latest_version())
}
