//! Impersonation session configuration.

use serde::{Deserialize, Serialize};

fn default_storage_key() -> String {
    "impersonation".into()
}

fn default_placeholder_name() -> String {
    "Super Admin".into()
}

fn default_placeholder_email() -> String {
    "superadmin@fleet.local".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Storage key holding the persisted impersonation document.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Refuse to start impersonating when the current-user cache is empty,
    /// instead of saving a placeholder identity for the original user.
    #[serde(default)]
    pub strict_identity: bool,

    /// Display name saved for the original user when the cache is empty.
    #[serde(default = "default_placeholder_name")]
    pub placeholder_name: String,

    /// Email saved for the original user when the cache is empty.
    #[serde(default = "default_placeholder_email")]
    pub placeholder_email: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            strict_identity: false,
            placeholder_name: default_placeholder_name(),
            placeholder_email: default_placeholder_email(),
        }
    }
}
