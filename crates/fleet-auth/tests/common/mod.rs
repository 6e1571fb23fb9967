//! Shared harness for impersonation integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use fleet_auth::navigator::RecordingNavigator;
use fleet_auth::store::{
    CredentialStore, IdentityCache, MemoryCredentialStore, MemoryIdentityCache, MemoryStorage,
    StoreResult,
};
use fleet_auth::{Collaborators, ImpersonationManager, SessionError};
use fleet_config::FleetConfig;
use fleet_core::{AdminData, CredentialPair, IdentitySummary, Role};

pub fn root_identity() -> IdentitySummary {
    IdentitySummary::new("Root", "root@fleet.local", Role::SuperAdmin)
}

pub fn root_tokens() -> CredentialPair {
    CredentialPair::new("S1", "S2")
}

pub fn acme_admin() -> AdminData {
    AdminData {
        identity: IdentitySummary::new("Acme Admin", "admin@acme.test", Role::Admin),
        tokens: CredentialPair::new("A1", "A2"),
    }
}

/// Identity cache whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyIdentityCache {
    inner: MemoryIdentityCache,
    fail_sets: AtomicBool,
}

impl FlakyIdentityCache {
    pub fn with_identity(identity: IdentitySummary) -> Self {
        Self {
            inner: MemoryIdentityCache::with_identity(identity),
            fail_sets: AtomicBool::new(false),
        }
    }

    pub fn fail_next_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }
}

impl IdentityCache for FlakyIdentityCache {
    fn get(&self) -> StoreResult<Option<IdentitySummary>> {
        self.inner.get()
    }

    fn set(&self, identity: &IdentitySummary) -> StoreResult<()> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(SessionError::IdentityCache("simulated write failure".into()));
        }
        self.inner.set(identity)
    }

    fn clear(&self) -> StoreResult<()> {
        self.inner.clear()
    }
}

/// Credential slot whose writes can be switched to fail.
#[derive(Default)]
pub struct FlakyCredentialStore {
    inner: MemoryCredentialStore,
    fail_sets: AtomicBool,
}

impl FlakyCredentialStore {
    pub fn with_active(pair: CredentialPair) -> Self {
        Self {
            inner: MemoryCredentialStore::with_active(pair),
            fail_sets: AtomicBool::new(false),
        }
    }

    pub fn fail_next_sets(&self, fail: bool) {
        self.fail_sets.store(fail, Ordering::SeqCst);
    }
}

impl CredentialStore for FlakyCredentialStore {
    fn get_active(&self) -> StoreResult<Option<CredentialPair>> {
        self.inner.get_active()
    }

    fn set_active(&self, pair: &CredentialPair) -> StoreResult<()> {
        if self.fail_sets.load(Ordering::SeqCst) {
            return Err(SessionError::CredentialStore("simulated write failure".into()));
        }
        self.inner.set_active(pair)
    }

    fn clear(&self) -> StoreResult<()> {
        self.inner.clear()
    }
}

pub struct Harness {
    pub storage: Arc<MemoryStorage>,
    pub credentials: Arc<FlakyCredentialStore>,
    pub identity: Arc<FlakyIdentityCache>,
    pub navigator: Arc<RecordingNavigator>,
    pub config: FleetConfig,
    pub manager: ImpersonationManager,
}

impl Harness {
    /// A logged-in super-admin holding `("S1", "S2")`.
    pub fn super_admin() -> Self {
        Self::build(
            Some(root_tokens()),
            Some(root_identity()),
            FleetConfig::default(),
        )
    }

    pub fn build(
        tokens: Option<CredentialPair>,
        identity: Option<IdentitySummary>,
        config: FleetConfig,
    ) -> Self {
        let storage = Arc::new(MemoryStorage::new());
        let credentials = Arc::new(match tokens {
            Some(pair) => FlakyCredentialStore::with_active(pair),
            None => FlakyCredentialStore::default(),
        });
        let identity = Arc::new(match identity {
            Some(identity) => FlakyIdentityCache::with_identity(identity),
            None => FlakyIdentityCache::default(),
        });
        let navigator = Arc::new(RecordingNavigator::new());
        let manager = Self::manager_over(&storage, &credentials, &identity, &navigator, &config);

        Self {
            storage,
            credentials,
            identity,
            navigator,
            config,
            manager,
        }
    }

    /// A fresh manager over the same stores, as after a page reload.
    pub fn reload(&self) -> ImpersonationManager {
        Self::manager_over(
            &self.storage,
            &self.credentials,
            &self.identity,
            &self.navigator,
            &self.config,
        )
    }

    pub fn session_persisted(&self) -> bool {
        self.storage.contains(&self.config.session.storage_key)
    }

    fn manager_over(
        storage: &Arc<MemoryStorage>,
        credentials: &Arc<FlakyCredentialStore>,
        identity: &Arc<FlakyIdentityCache>,
        navigator: &Arc<RecordingNavigator>,
        config: &FleetConfig,
    ) -> ImpersonationManager {
        ImpersonationManager::new(
            Collaborators {
                storage: storage.clone(),
                credentials: credentials.clone(),
                identity: identity.clone(),
                navigator: navigator.clone(),
            },
            config,
        )
    }
}
