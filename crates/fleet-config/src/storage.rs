//! Local storage locations for session state and credentials.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const fn default_use_keyring() -> bool {
    true
}

fn default_keyring_service() -> String {
    "fleet-dashboard".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for persisted key-value entries. Empty means `~/.fleet`.
    #[serde(default)]
    pub data_dir: String,

    /// Keep the active credential pair in the OS keychain (falls back to a
    /// file under `data_dir` when the keychain is unavailable).
    #[serde(default = "default_use_keyring")]
    pub use_keyring: bool,

    /// Keychain service name.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl StorageConfig {
    /// Resolve the data directory, defaulting to `~/.fleet`.
    #[must_use]
    pub fn resolved_data_dir(&self) -> Option<PathBuf> {
        if self.data_dir.trim().is_empty() {
            dirs::home_dir().map(|home| home.join(".fleet"))
        } else {
            Some(PathBuf::from(&self.data_dir))
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::new(),
            use_keyring: default_use_keyring(),
            keyring_service: default_keyring_service(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert!(config.data_dir.is_empty());
        assert!(config.use_keyring);
        assert_eq!(config.keyring_service, "fleet-dashboard");
    }

    #[test]
    fn explicit_data_dir_wins() {
        let config = StorageConfig {
            data_dir: "/tmp/fleet-test".into(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_data_dir(),
            Some(PathBuf::from("/tmp/fleet-test"))
        );
    }

    #[test]
    fn empty_data_dir_resolves_under_home() {
        let config = StorageConfig::default();
        if let Some(dir) = config.resolved_data_dir() {
            assert!(dir.ends_with(".fleet"));
        }
    }
}
