//! Remote store integration.
//!
//! Sessions can live in a hosted PostgREST table instead of the local
//! SQLite file. The table location comes from the configuration; the API
//! key comes from the environment or from an encrypted file in the data
//! directory, prompted for once.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::api::{rest::RestStore, resolve_api_key, RestConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = RestConfig { api_url: "https://example.supabase.co".into(), table: "work_sessions".into() };
//! let store = RestStore::new(&config, &resolve_api_key()?);
//! # Ok(())
//! # }
//! ```

use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use anyhow::Result;
use std::env;

pub mod rest;

pub use rest::RestConfig;

pub const API_KEY_ENV: &str = "TIMECARD_STORE_KEY";
const API_KEY_FILE: &str = ".store_key";

/// Encrypted cache of the store API key.
pub fn api_key_secret() -> Secret {
    Secret::new(API_KEY_FILE, &Message::PromptStoreApiKey.to_string())
}

/// API key from `TIMECARD_STORE_KEY`, else the encrypted cache, else an
/// interactive prompt whose answer is cached.
pub fn resolve_api_key() -> Result<String> {
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => api_key_secret().get_or_prompt(),
    }
}
