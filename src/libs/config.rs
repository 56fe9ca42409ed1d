//! Configuration management for timecard.
//!
//! Settings live in `config.json` inside the platform data directory:
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\timecard\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/timecard/config.json`
//! - **Linux**: `~/.local/share/lacodda/timecard/config.json`
//!
//! A missing file means defaults: a local SQLite store, lunch and dinner
//! rest windows, and the built-in identities. Every field is optional in the
//! file, so hand-written partial configs work. The reference clock is not a
//! setting: every user reads the shared table in `Asia/Tokyo`.
//!
//! A few values can be overridden from the environment (or a `.env` file):
//!
//! | Variable               | Overrides                       |
//! |------------------------|---------------------------------|
//! | `TIMECARD_STORE_URL`   | switches to the remote store    |
//! | `TIMECARD_STORE_TABLE` | remote table name               |
//!
//! The remote API key is never written here; see [`crate::api::resolve_api_key`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timecard::libs::config::Config;
//!
//! let config = Config::load()?;
//! let clock = config.clock();
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::{api_key_secret, RestConfig};
use crate::libs::clock::ReferenceClock;
use crate::libs::error::TrackerError;
use crate::libs::identity::{self, Identity, DEFAULT_IDENTITY};
use crate::libs::messages::Message;
use crate::libs::rest_span::RestSpan;
use crate::{msg_print, msg_success};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_HOURLY_RATE: f64 = 45.0;
pub const DEFAULT_BREAK_MINUTES: i64 = 60;

pub const ENV_STORE_URL: &str = "TIMECARD_STORE_URL";
pub const ENV_STORE_TABLE: &str = "TIMECARD_STORE_TABLE";

/// Which backend holds the sessions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    /// SQLite file in the data directory.
    #[default]
    Local,
    /// Hosted PostgREST table.
    Remote(RestConfig),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    /// Daily windows that prompt for a break when a session overlaps them.
    #[serde(default = "RestSpan::defaults")]
    pub rest_spans: Vec<RestSpan>,

    /// Suggested answer to the break prompt.
    #[serde(default = "default_break_minutes")]
    pub default_break_minutes: i64,

    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: f64,

    #[serde(default = "Identity::defaults")]
    pub identities: Vec<Identity>,

    #[serde(default = "default_identity")]
    pub active_identity: String,
}

fn default_break_minutes() -> i64 {
    DEFAULT_BREAK_MINUTES
}

fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

fn default_identity() -> String {
    DEFAULT_IDENTITY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: StoreConfig::default(),
            rest_spans: RestSpan::defaults(),
            default_break_minutes: DEFAULT_BREAK_MINUTES,
            hourly_rate: DEFAULT_HOURLY_RATE,
            identities: Identity::defaults(),
            active_identity: default_identity(),
        }
    }
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does
    /// not exist. A file that exists but cannot be parsed is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// [`Config::read`] with environment overrides applied.
    pub fn load() -> Result<Config> {
        Ok(Self::read()?.with_overrides(|key| env::var(key).ok()))
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file and the cached API key.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(&config_file_path)?;
        }
        api_key_secret().forget()
    }

    /// Applies overrides looked up through `lookup`. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_url) = value(ENV_STORE_URL) {
            let table = match &self.store {
                StoreConfig::Remote(remote) => remote.table.clone(),
                StoreConfig::Local => crate::api::rest::DEFAULT_TABLE.to_string(),
            };
            self.store = StoreConfig::Remote(RestConfig { api_url, table });
        }
        if let (Some(table), StoreConfig::Remote(remote)) = (value(ENV_STORE_TABLE), &mut self.store) {
            remote.table = table;
        }
        self
    }

    /// The reference clock. The same for every user and never read from the
    /// file.
    pub fn clock(&self) -> ReferenceClock {
        ReferenceClock::default()
    }

    /// The identity a command runs as: `requested` when given, otherwise
    /// the active one. Either way it must be a configured identity.
    pub fn identity(&self, requested: Option<&str>) -> Result<&Identity, TrackerError> {
        identity::resolve(&self.identities, requested.unwrap_or(&self.active_identity))
    }

    /// Interactive setup wizard seeded with the current configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read()?;
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigModuleStore, true);
        let backends = ["Local SQLite file", "Hosted REST table"];
        let current = matches!(config.store, StoreConfig::Remote(_)) as usize;
        let backend = Select::with_theme(&theme)
            .with_prompt(Message::PromptSelectBackend.to_string())
            .items(&backends)
            .default(current)
            .interact()?;

        config.store = match backend {
            0 => StoreConfig::Local,
            _ => {
                let default = match &config.store {
                    StoreConfig::Remote(remote) => remote.clone(),
                    StoreConfig::Local => RestConfig {
                        api_url: String::new(),
                        table: crate::api::rest::DEFAULT_TABLE.to_string(),
                    },
                };
                let remote = RestConfig {
                    api_url: Input::with_theme(&theme)
                        .with_prompt(Message::PromptStoreUrl.to_string())
                        .with_initial_text(default.api_url)
                        .interact_text()?,
                    table: Input::with_theme(&theme)
                        .with_prompt(Message::PromptStoreTable.to_string())
                        .default(default.table)
                        .interact_text()?,
                };
                if Confirm::with_theme(&theme)
                    .with_prompt(Message::PromptUpdateApiKey.to_string())
                    .default(false)
                    .interact()?
                {
                    api_key_secret().prompt()?;
                    msg_success!(Message::ApiKeyStored);
                }
                StoreConfig::Remote(remote)
            }
        };

        msg_print!(Message::ConfigModulePayroll, true);
        config.hourly_rate = Input::with_theme(&theme)
            .with_prompt(Message::PromptHourlyRate.to_string())
            .default(config.hourly_rate)
            .interact_text()?;
        config.default_break_minutes = Input::with_theme(&theme)
            .with_prompt(Message::PromptDefaultBreak.to_string())
            .default(config.default_break_minutes)
            .validate_with(|minutes: &i64| if *minutes >= 0 { Ok(()) } else { Err("must not be negative") })
            .interact_text()?;

        let active = config
            .identities
            .iter()
            .position(|identity| identity.token == config.active_identity)
            .unwrap_or(0);
        let selected = Select::with_theme(&theme)
            .with_prompt(Message::PromptSelectIdentity.to_string())
            .items(&config.identities)
            .default(active)
            .interact()?;
        if let Some(identity) = config.identities.get(selected) {
            config.active_identity = identity.token.clone();
        }

        Ok(config)
    }
}
