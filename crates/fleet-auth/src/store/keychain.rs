//! Active credential slot in the OS keychain, with a file fallback.

use std::sync::Arc;

use fleet_core::CredentialPair;

use super::record::{CREDENTIALS_KEY, JsonRecord};
use super::{CredentialStore, KeyValueStorage, StoreResult};
use crate::error::SessionError;

const KEYRING_USER: &str = "active-credentials";

/// Keeps the active pair in the OS keychain under `service`.
///
/// When the keychain is unavailable the pair goes to the `credentials`
/// record of the fallback storage instead. Only one tier holds a pair at a
/// time. Loads check the keychain first.
pub struct KeyringCredentialStore {
    entry: Option<keyring::Entry>,
    fallback: JsonRecord<CredentialPair>,
}

impl KeyringCredentialStore {
    #[must_use]
    pub fn new(service: &str, fallback: Arc<dyn KeyValueStorage>) -> Self {
        let entry = match keyring::Entry::new(service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(%error, service, "keyring unavailable; using file storage");
                None
            }
        };
        Self {
            entry,
            fallback: JsonRecord::new(fallback, CREDENTIALS_KEY),
        }
    }

    /// Which tier currently holds the active pair (for status display).
    #[must_use]
    pub fn detect_source(&self) -> Option<&'static str> {
        if self.keyring_pair().is_some() {
            return Some("keyring");
        }
        if matches!(self.fallback.load(), Ok(Some(_))) {
            return Some("file");
        }
        None
    }

    fn keyring_pair(&self) -> Option<CredentialPair> {
        let secret = match self.entry.as_ref()?.get_password() {
            Ok(secret) if !secret.is_empty() => secret,
            Ok(_) | Err(keyring::Error::NoEntry) => return None,
            Err(error) => {
                tracing::warn!(%error, "keyring read failed; trying file");
                return None;
            }
        };
        match serde_json::from_str(&secret) {
            Ok(pair) => Some(pair),
            Err(error) => {
                tracing::warn!(%error, "keyring entry is not a credential pair; trying file");
                None
            }
        }
    }

    /// Remove the keychain copy; a missing entry is not an error.
    fn delete_keyring_entry(&self) {
        let Some(entry) = &self.entry else {
            return;
        };
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => {}
            Err(error) => tracing::warn!(%error, "failed to remove keyring credentials"),
        }
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get_active(&self) -> StoreResult<Option<CredentialPair>> {
        if let Some(pair) = self.keyring_pair() {
            return Ok(Some(pair));
        }
        self.fallback
            .load()
            .map_err(|e| SessionError::CredentialStore(e.to_string()))
    }

    fn set_active(&self, pair: &CredentialPair) -> StoreResult<()> {
        let secret = serde_json::to_string(pair)
            .map_err(|e| SessionError::CredentialStore(format!("serialize credentials: {e}")))?;

        let stored = match &self.entry {
            Some(entry) => match entry.set_password(&secret) {
                Ok(()) => true,
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    false
                }
            },
            None => false,
        };

        if stored {
            if let Err(error) = self.fallback.delete() {
                tracing::warn!(%error, "failed to remove fallback credentials file");
            }
            Ok(())
        } else {
            self.fallback
                .store(pair)
                .map_err(|e| SessionError::CredentialStore(e.to_string()))?;
            // Loads prefer the keychain, so an older pair there would shadow this one.
            self.delete_keyring_entry();
            Ok(())
        }
    }

    fn clear(&self) -> StoreResult<()> {
        self.delete_keyring_entry();
        self.fallback
            .delete()
            .map_err(|e| SessionError::CredentialStore(e.to_string()))
    }
}
