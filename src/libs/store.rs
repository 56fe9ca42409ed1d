//! The boundary to wherever sessions are persisted.
//!
//! Every call is one awaited round trip. Failures surface as
//! [`StoreError`] and mean the operation did not happen; nothing here
//! retries.

use crate::api::{resolve_api_key, rest::RestStore};
use crate::db::sessions::Sessions;
use crate::libs::config::StoreConfig;
use crate::libs::error::StoreError;
use crate::libs::session::{NewSession, SessionPatch, WorkSession};
use chrono::{DateTime, Utc};

#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// Creates a row and returns its assigned id.
    async fn insert(&mut self, session: &NewSession) -> Result<i64, StoreError>;

    /// Sessions of `user_id` starting within `[from, to]`, ascending by start.
    async fn query_by_user_and_range(
        &mut self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WorkSession>, StoreError>;

    /// Most recently started session of `user_id` without an end.
    async fn query_open_session(&mut self, user_id: &str) -> Result<Option<WorkSession>, StoreError>;

    async fn update(&mut self, id: i64, patch: &SessionPatch) -> Result<(), StoreError>;

    async fn update_batch(&mut self, ids: &[i64], patch: &SessionPatch) -> Result<(), StoreError>;
}

/// Store selected by configuration.
pub enum Backend {
    Local(Sessions),
    Remote(RestStore),
}

impl Backend {
    /// Opens the configured store. The remote store needs an API key and
    /// may prompt for one.
    pub fn open(config: &StoreConfig) -> anyhow::Result<Backend> {
        let backend = match config {
            StoreConfig::Local => Backend::Local(Sessions::new()?),
            StoreConfig::Remote(remote) => Backend::Remote(RestStore::new(remote, &resolve_api_key()?)),
        };
        tracing::debug!(backend = backend.name(), "opened session store");
        Ok(backend)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Local(_) => "local",
            Backend::Remote(_) => "remote",
        }
    }
}

impl SessionStore for Backend {
    async fn insert(&mut self, session: &NewSession) -> Result<i64, StoreError> {
        match self {
            Backend::Local(store) => store.insert(session).await,
            Backend::Remote(store) => store.insert(session).await,
        }
    }

    async fn query_by_user_and_range(
        &mut self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WorkSession>, StoreError> {
        match self {
            Backend::Local(store) => store.query_by_user_and_range(user_id, from, to).await,
            Backend::Remote(store) => store.query_by_user_and_range(user_id, from, to).await,
        }
    }

    async fn query_open_session(&mut self, user_id: &str) -> Result<Option<WorkSession>, StoreError> {
        match self {
            Backend::Local(store) => store.query_open_session(user_id).await,
            Backend::Remote(store) => store.query_open_session(user_id).await,
        }
    }

    async fn update(&mut self, id: i64, patch: &SessionPatch) -> Result<(), StoreError> {
        match self {
            Backend::Local(store) => store.update(id, patch).await,
            Backend::Remote(store) => store.update(id, patch).await,
        }
    }

    async fn update_batch(&mut self, ids: &[i64], patch: &SessionPatch) -> Result<(), StoreError> {
        match self {
            Backend::Local(store) => store.update_batch(ids, patch).await,
            Backend::Remote(store) => store.update_batch(ids, patch).await,
        }
    }
}
