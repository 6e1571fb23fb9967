//! Wires the impersonation manager to on-disk collaborators.

use std::sync::Arc;

use anyhow::Context;
use fleet_auth::navigator::LogNavigator;
use fleet_auth::store::{
    CredentialStore, FileStorage, IdentityCache, KeyringCredentialStore, StorageCredentialStore,
    StorageIdentityCache,
};
use fleet_auth::{Collaborators, ImpersonationManager};
use fleet_config::FleetConfig;

pub struct AppContext {
    pub config: FleetConfig,
    pub credentials: Arc<dyn CredentialStore>,
    pub identity: Arc<dyn IdentityCache>,
    pub manager: ImpersonationManager,
    keyring: Option<Arc<KeyringCredentialStore>>,
}

impl AppContext {
    /// Open storage under the configured data directory and restore any
    /// persisted impersonation session.
    pub fn init(config: FleetConfig) -> anyhow::Result<Self> {
        let data_dir = config
            .storage
            .resolved_data_dir()
            .context("home directory not found; set FLEET_STORAGE__DATA_DIR")?;
        tracing::debug!(data_dir = %data_dir.display(), "opening session storage");

        let storage = Arc::new(FileStorage::new(data_dir));
        let identity: Arc<dyn IdentityCache> = Arc::new(StorageIdentityCache::new(storage.clone()));

        let keyring = config.storage.use_keyring.then(|| {
            Arc::new(KeyringCredentialStore::new(
                &config.storage.keyring_service,
                storage.clone(),
            ))
        });
        let credentials: Arc<dyn CredentialStore> = match &keyring {
            Some(store) => store.clone(),
            None => Arc::new(StorageCredentialStore::new(storage.clone())),
        };

        let manager = ImpersonationManager::new(
            Collaborators {
                storage,
                credentials: credentials.clone(),
                identity: identity.clone(),
                navigator: Arc::new(LogNavigator),
            },
            &config,
        );

        Ok(Self {
            config,
            credentials,
            identity,
            manager,
            keyring,
        })
    }

    /// Where the active credentials currently live.
    pub fn credential_source(&self) -> Option<&'static str> {
        match &self.keyring {
            Some(store) => store.detect_source(),
            None => self
                .credentials
                .get_active()
                .ok()
                .flatten()
                .map(|_| "file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::CredentialPair;

    fn file_only_config(dir: &std::path::Path) -> FleetConfig {
        let mut config = FleetConfig::default();
        config.storage.data_dir = dir.display().to_string();
        config.storage.use_keyring = false;
        config
    }

    #[test]
    fn file_backed_context_reports_file_source() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let ctx = AppContext::init(file_only_config(tmp.path())).expect("init");
        assert_eq!(ctx.credential_source(), None);

        ctx.credentials
            .set_active(&CredentialPair::new("S1", "S2"))
            .unwrap();
        assert_eq!(ctx.credential_source(), Some("file"));
        assert!(tmp.path().join("credentials.json").exists());
    }

    #[test]
    fn corrupt_session_file_is_dropped_at_init() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        std::fs::write(tmp.path().join("impersonation.json"), "garbage").unwrap();

        let ctx = AppContext::init(file_only_config(tmp.path())).expect("init");
        assert!(!ctx.manager.is_impersonating());
        assert!(!tmp.path().join("impersonation.json").exists());
    }
}
