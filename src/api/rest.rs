//! Session store over a hosted PostgREST table (the Supabase REST API).
//!
//! The table is expected to expose `id`, `user_id`, `start` and `end`
//! (`timestamptz`), `break_minutes` and `paid` columns.

use crate::libs::error::StoreError;
use crate::libs::session::{NewSession, SessionPatch, WorkSession};
use crate::libs::store::SessionStore;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, RequestBuilder, Response,
};
use serde::{Deserialize, Serialize};

pub const REST_PATH: &str = "rest/v1";
pub const DEFAULT_TABLE: &str = "work_sessions";
const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "Prefer";

/// Location of the hosted table. The API key is resolved separately so it
/// never lands in the configuration file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RestConfig {
    pub api_url: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

pub struct RestStore {
    client: Client,
    config: RestConfig,
    api_key: String,
}

impl RestStore {
    pub fn new(config: &RestConfig, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            api_key: api_key.to_owned(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}/{}", self.config.api_url.trim_end_matches('/'), REST_PATH, self.config.table)
    }

    fn headers(&self) -> Result<HeaderMap, StoreError> {
        let invalid = |_| StoreError::Config("API key contains characters not allowed in a header".to_string());
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(&self.api_key).map_err(invalid)?);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(invalid)?,
        );
        Ok(headers)
    }

    fn request(&self, builder: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        Ok(builder.headers(self.headers()?))
    }

    /// PostgREST compares timestamps with microsecond precision.
    fn timestamp(instant: DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn id_list(ids: &[i64]) -> String {
        let ids: Vec<String> = ids.iter().map(i64::to_string).collect();
        format!("in.({})", ids.join(","))
    }

    async fn check(res: Response) -> Result<Response, StoreError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), %body, "store request rejected");
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode(res: Response) -> Result<Vec<WorkSession>, StoreError> {
        res.json::<Vec<WorkSession>>().await.map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn patch(&self, filter: (&str, String), patch: &SessionPatch) -> Result<(), StoreError> {
        let builder = self
            .client
            .patch(self.endpoint())
            .query(&[filter])
            .header(PREFER_HEADER, "return=minimal")
            .json(patch);
        let res = self.request(builder)?.send().await?;
        Self::check(res).await?;
        Ok(())
    }
}

impl SessionStore for RestStore {
    async fn insert(&mut self, session: &NewSession) -> Result<i64, StoreError> {
        let builder = self
            .client
            .post(self.endpoint())
            .header(PREFER_HEADER, "return=representation")
            .json(&[session]);
        let res = Self::check(self.request(builder)?.send().await?).await?;
        let created = Self::decode(res).await?;
        let id = created.first().map(|s| s.id).ok_or(StoreError::MissingId)?;
        tracing::debug!(id, user = %session.user_id, "inserted session");
        Ok(id)
    }

    async fn query_by_user_and_range(
        &mut self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<WorkSession>, StoreError> {
        let query = [
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", user_id)),
            ("start", format!("gte.{}", Self::timestamp(from))),
            ("start", format!("lte.{}", Self::timestamp(to))),
            ("order", "start.asc".to_string()),
        ];
        let builder = self.client.get(self.endpoint()).query(&query);
        let res = Self::check(self.request(builder)?.send().await?).await?;
        let sessions = Self::decode(res).await?;
        tracing::debug!(count = sessions.len(), user = user_id, "fetched sessions");
        Ok(sessions)
    }

    async fn query_open_session(&mut self, user_id: &str) -> Result<Option<WorkSession>, StoreError> {
        let query = [
            ("select", "*".to_string()),
            ("user_id", format!("eq.{}", user_id)),
            ("end", "is.null".to_string()),
            ("order", "start.desc".to_string()),
            ("limit", "1".to_string()),
        ];
        let builder = self.client.get(self.endpoint()).query(&query);
        let res = Self::check(self.request(builder)?.send().await?).await?;
        Ok(Self::decode(res).await?.into_iter().next())
    }

    async fn update(&mut self, id: i64, patch: &SessionPatch) -> Result<(), StoreError> {
        if patch.is_empty() {
            return Ok(());
        }
        self.patch(("id", format!("eq.{}", id)), patch).await
    }

    async fn update_batch(&mut self, ids: &[i64], patch: &SessionPatch) -> Result<(), StoreError> {
        if ids.is_empty() || patch.is_empty() {
            return Ok(());
        }
        self.patch(("id", Self::id_list(ids)), patch).await
    }
}
