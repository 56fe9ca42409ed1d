//! SQLite-backed session store.
//!
//! Instants are written through rusqlite's chrono support, which renders
//! UTC timestamps in a fixed textual layout so that range filters can use
//! plain string comparison.

use crate::db::db::Db;
use crate::libs::error::StoreError;
use crate::libs::session::{NewSession, SessionPatch, WorkSession};
use crate::libs::store::SessionStore;
use chrono::{DateTime, Utc};
use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use std::path::Path;

const INSERT_SESSION: &str = r#"INSERT INTO work_sessions (user_id, start, "end", break_minutes) VALUES (?1, ?2, ?3, ?4)"#;
const SELECT_COLUMNS: &str = r#"SELECT id, user_id, start, "end", break_minutes, paid FROM work_sessions"#;

pub struct Sessions {
    db: Db,
}

impl Sessions {
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self { db: Db::new()? })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self { db: Db::open(path)? })
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<WorkSession> {
        Ok(WorkSession {
            id: row.get(0)?,
            user_id: row.get(1)?,
            start: row.get(2)?,
            end: row.get(3)?,
            break_minutes: row.get(4)?,
            paid: row.get(5)?,
        })
    }

    pub fn fetch(&self, id: i64) -> Result<Option<WorkSession>, StoreError> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let session = self.db.conn.query_row(&sql, params![id], Self::map_row).optional()?;
        Ok(session)
    }

    /// `SET` clause and values for the fields present in `patch`.
    fn set_clause(patch: &SessionPatch) -> (String, Vec<Box<dyn ToSql>>) {
        let mut columns = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(end) = patch.end {
            columns.push(r#""end" = ?"#);
            values.push(Box::new(end));
        }
        if let Some(break_minutes) = patch.break_minutes {
            columns.push("break_minutes = ?");
            values.push(Box::new(break_minutes));
        }
        if let Some(paid) = patch.paid {
            columns.push("paid = ?");
            values.push(Box::new(paid));
        }

        (columns.join(", "), values)
    }

    fn apply(&mut self, ids: &[i64], patch: &SessionPatch) -> Result<usize, StoreError> {
        if ids.is_empty() || patch.is_empty() {
            return Ok(0);
        }

        let (set, mut values) = Self::set_clause(patch);
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("UPDATE work_sessions SET {} WHERE id IN ({})", set, placeholders);
        values.extend(ids.iter().map(|id| Box::new(*id) as Box<dyn ToSql>));

        let affected = self.db.conn.execute(&sql, params_from_iter(values.iter()))?;
        Ok(affected)
    }
}

impl SessionStore for Sessions {
    async fn insert(&mut self, session: &NewSession) -> Result<i64, StoreError> {
        self.db.conn.execute(
            INSERT_SESSION,
            params![session.user_id, session.start, session.end, session.break_minutes],
        )?;
        let id = self.db.conn.last_insert_rowid();
        tracing::debug!(id, user = %session.user_id, "inserted session");
        Ok(id)
    }

    async fn query_by_user_and_range(
        &mut self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WorkSession>, StoreError> {
        let sql = format!(
            "{} WHERE user_id = ?1 AND start >= ?2 AND start <= ?3 ORDER BY start ASC",
            SELECT_COLUMNS
        );
        let mut stmt = self.db.conn.prepare(&sql)?;
        let sessions = stmt
            .query_map(params![user_id, from, to], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sessions)
    }

    async fn query_open_session(&mut self, user_id: &str) -> Result<Option<WorkSession>, StoreError> {
        let sql = format!(
            r#"{} WHERE user_id = ?1 AND "end" IS NULL ORDER BY start DESC LIMIT 1"#,
            SELECT_COLUMNS
        );
        let session = self.db.conn.query_row(&sql, params![user_id], Self::map_row).optional()?;
        Ok(session)
    }

    async fn update(&mut self, id: i64, patch: &SessionPatch) -> Result<(), StoreError> {
        let affected = self.apply(&[id], patch)?;
        tracing::debug!(id, affected, "updated session");
        Ok(())
    }

    async fn update_batch(&mut self, ids: &[i64], patch: &SessionPatch) -> Result<(), StoreError> {
        let affected = self.apply(ids, patch)?;
        tracing::debug!(requested = ids.len(), affected, "updated sessions");
        Ok(())
    }
}
