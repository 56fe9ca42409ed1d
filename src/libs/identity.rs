//! The fixed set of identities sessions can be recorded under.
//!
//! There is no authentication: an identity is a label picked from the
//! configured list.

use crate::libs::error::TrackerError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_IDENTITY: &str = "cat001";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Value written to `user_id`.
    pub token: String,
    pub label: String,
}

impl Identity {
    pub fn new(token: &str, label: &str) -> Self {
        Self {
            token: token.to_owned(),
            label: label.to_owned(),
        }
    }

    pub fn defaults() -> Vec<Identity> {
        vec![
            Identity::new(DEFAULT_IDENTITY, "Cat"),
            Identity::new("user27", "27"),
            Identity::new("guest", "Guest"),
        ]
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.token)
    }
}

/// Looks `token` up in `identities`.
pub fn resolve<'a>(identities: &'a [Identity], token: &str) -> Result<&'a Identity, TrackerError> {
    identities
        .iter()
        .find(|identity| identity.token == token)
        .ok_or_else(|| TrackerError::UnknownIdentity(token.to_owned()))
}
