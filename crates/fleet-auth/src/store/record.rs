//! Credential slot and identity cache kept as JSON records in a
//! [`KeyValueStorage`], the way the dashboard keeps them in browser storage.

use std::marker::PhantomData;
use std::sync::Arc;

use fleet_core::{CredentialPair, IdentitySummary};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{CredentialStore, IdentityCache, KeyValueStorage, StoreResult};
use crate::error::SessionError;

pub const CREDENTIALS_KEY: &str = "credentials";
pub const CURRENT_USER_KEY: &str = "user";

/// A single JSON value stored under a fixed key.
///
/// Unparseable content reads as absent: a damaged cache entry is dropped
/// rather than blocking the caller.
pub(crate) struct JsonRecord<T> {
    storage: Arc<dyn KeyValueStorage>,
    key: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonRecord<T> {
    pub(crate) fn new(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Self {
        Self {
            storage,
            key,
            _value: PhantomData,
        }
    }

    pub(crate) fn load(&self) -> StoreResult<Option<T>> {
        let Some(raw) = self.storage.read(self.key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::warn!(key = self.key, %error, "ignoring unparseable record");
                Ok(None)
            }
        }
    }

    pub(crate) fn store(&self, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value).map_err(|e| {
            SessionError::Storage(format!("serialize {}: {e}", self.key))
        })?;
        self.storage.write(self.key, &json)
    }

    pub(crate) fn delete(&self) -> StoreResult<()> {
        self.storage.remove(self.key)
    }
}

/// Active credential slot stored under the `credentials` key.
pub struct StorageCredentialStore {
    record: JsonRecord<CredentialPair>,
}

impl StorageCredentialStore {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            record: JsonRecord::new(storage, CREDENTIALS_KEY),
        }
    }
}

impl CredentialStore for StorageCredentialStore {
    fn get_active(&self) -> StoreResult<Option<CredentialPair>> {
        self.record
            .load()
            .map_err(|e| SessionError::CredentialStore(e.to_string()))
    }

    fn set_active(&self, pair: &CredentialPair) -> StoreResult<()> {
        self.record
            .store(pair)
            .map_err(|e| SessionError::CredentialStore(e.to_string()))
    }

    fn clear(&self) -> StoreResult<()> {
        self.record
            .delete()
            .map_err(|e| SessionError::CredentialStore(e.to_string()))
    }
}

/// Current-user cache stored under the `user` key. Holds identity fields only.
pub struct StorageIdentityCache {
    record: JsonRecord<IdentitySummary>,
}

impl StorageIdentityCache {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            record: JsonRecord::new(storage, CURRENT_USER_KEY),
        }
    }
}

impl IdentityCache for StorageIdentityCache {
    fn get(&self) -> StoreResult<Option<IdentitySummary>> {
        self.record
            .load()
            .map_err(|e| SessionError::IdentityCache(e.to_string()))
    }

    fn set(&self, identity: &IdentitySummary) -> StoreResult<()> {
        self.record
            .store(identity)
            .map_err(|e| SessionError::IdentityCache(e.to_string()))
    }

    fn clear(&self) -> StoreResult<()> {
        self.record
            .delete()
            .map_err(|e| SessionError::IdentityCache(e.to_string()))
    }
}
