//! Collaborator abstractions the session manager reads and writes.
//!
//! The manager only needs three stores: a key-value store that survives
//! restarts, the active credential slot, and the current-user cache.

pub mod file;
pub mod keychain;
pub mod memory;
pub mod record;

pub use file::FileStorage;
pub use keychain::KeyringCredentialStore;
pub use memory::{MemoryCredentialStore, MemoryIdentityCache, MemoryStorage};
pub use record::{StorageCredentialStore, StorageIdentityCache};

use fleet_core::{CredentialPair, IdentitySummary};

use crate::error::SessionError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, SessionError>;

/// Persistent key-value storage scoped to one installation.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value under `key`, `None` if absent.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// The active credential slot consumed by the API layer.
pub trait CredentialStore: Send + Sync {
    fn get_active(&self) -> StoreResult<Option<CredentialPair>>;

    fn set_active(&self, pair: &CredentialPair) -> StoreResult<()>;

    fn clear(&self) -> StoreResult<()>;
}

/// Locally cached record of the current user.
pub trait IdentityCache: Send + Sync {
    fn get(&self) -> StoreResult<Option<IdentitySummary>>;

    fn set(&self, identity: &IdentitySummary) -> StoreResult<()>;

    fn clear(&self) -> StoreResult<()>;
}
