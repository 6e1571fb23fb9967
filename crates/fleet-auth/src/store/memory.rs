//! In-memory store implementations

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use fleet_core::{CredentialPair, IdentitySummary};

use super::{CredentialStore, IdentityCache, KeyValueStorage, StoreResult};

/// In-memory key-value storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// In-memory active credential slot
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    active: RwLock<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_active(pair: CredentialPair) -> Self {
        Self {
            active: RwLock::new(Some(pair)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_active(&self) -> StoreResult<Option<CredentialPair>> {
        Ok(self
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set_active(&self, pair: &CredentialPair) -> StoreResult<()> {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// In-memory current-user cache
#[derive(Debug, Default)]
pub struct MemoryIdentityCache {
    current: RwLock<Option<IdentitySummary>>,
}

impl MemoryIdentityCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_identity(identity: IdentitySummary) -> Self {
        Self {
            current: RwLock::new(Some(identity)),
        }
    }
}

impl IdentityCache for MemoryIdentityCache {
    fn get(&self) -> StoreResult<Option<IdentitySummary>> {
        Ok(self
            .current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn set(&self, identity: &IdentitySummary) -> StoreResult<()> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
