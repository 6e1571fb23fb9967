//! Mirrors the session into persistent storage.
//!
//! The storage key exists if and only if an impersonation is active: an
//! inactive session is persisted by removing the key, never by writing a
//! blanked document.

use std::sync::Arc;

use fleet_core::{ImpersonationSession, SessionDocument};

use crate::error::SessionError;
use crate::store::KeyValueStorage;

pub struct PersistenceBridge {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl PersistenceBridge {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted session.
    ///
    /// `Ok(None)` when the key is absent. `CorruptPersistedState` when the
    /// blob does not parse, fails linkage validation, or describes an
    /// inactive session (which must never be stored).
    ///
    /// # Errors
    ///
    /// `SessionError::Storage` if the storage itself cannot be read.
    pub fn load(&self) -> Result<Option<ImpersonationSession>, SessionError> {
        let Some(raw) = self.storage.read(&self.key)? else {
            return Ok(None);
        };

        let doc: SessionDocument = serde_json::from_str(&raw)
            .map_err(|e| SessionError::CorruptPersistedState(format!("parse: {e}")))?;
        let session = ImpersonationSession::try_from(doc)
            .map_err(|e| SessionError::CorruptPersistedState(e.to_string()))?;

        if !session.is_impersonating() {
            return Err(SessionError::CorruptPersistedState(
                "stored session is not impersonating".into(),
            ));
        }
        Ok(Some(session))
    }

    /// Write an active session, or remove the key for an inactive one.
    ///
    /// # Errors
    ///
    /// `SessionError::Storage` if the write or removal fails.
    pub fn persist(&self, session: &ImpersonationSession) -> Result<(), SessionError> {
        if !session.is_impersonating() {
            return self.clear();
        }
        let json = serde_json::to_string(&session.to_document())
            .map_err(|e| SessionError::Storage(format!("serialize session: {e}")))?;
        self.storage.write(&self.key, &json)
    }

    /// Remove the persisted session.
    ///
    /// # Errors
    ///
    /// `SessionError::Storage` if the removal fails.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.storage.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;
    use fleet_core::{CompanyRef, CredentialPair, IdentitySummary, OriginalUser, Role};
    use rstest::rstest;

    fn active() -> ImpersonationSession {
        ImpersonationSession::begin(
            OriginalUser {
                identity: IdentitySummary::new("Root", "root@fleet.local", Role::SuperAdmin),
                tokens: CredentialPair::new("S1", "S2"),
            },
            CompanyRef::new("co42", "Acme"),
        )
    }

    #[test]
    fn persist_then_load_active_session() {
        let storage = Arc::new(MemoryStorage::new());
        let bridge = PersistenceBridge::new(storage.clone(), "impersonation");
        let session = active();

        bridge.persist(&session).unwrap();
        assert!(storage.contains("impersonation"));
        assert_eq!(bridge.load().unwrap(), Some(session));
    }

    #[test]
    fn persisting_inactive_removes_key() {
        let storage = Arc::new(MemoryStorage::new());
        let bridge = PersistenceBridge::new(storage.clone(), "impersonation");

        bridge.persist(&active()).unwrap();
        bridge.persist(&ImpersonationSession::Inactive).unwrap();
        assert!(!storage.contains("impersonation"));
        assert_eq!(bridge.load().unwrap(), None);
    }

    #[rstest]
    #[case::not_json("{{{")]
    #[case::wrong_shape(r#"{"foo": 1}"#)]
    #[case::inactive_document(r#"{"isImpersonating": false}"#)]
    #[case::missing_company(
        r#"{"isImpersonating": true, "originalUser": {"identity": {"name": "Root", "email": "r@x", "role": "SUPER_ADMIN"}, "tokens": {"accessToken": "S1", "refreshToken": "S2"}}}"#
    )]
    #[case::unknown_role(
        r#"{"isImpersonating": true, "originalUser": {"identity": {"name": "Root", "email": "r@x", "role": "GOD"}, "tokens": {"accessToken": "S1", "refreshToken": "S2"}}, "impersonatedCompany": {"id": "co42", "name": "Acme"}}"#
    )]
    fn malformed_blobs_are_corrupt(#[case] blob: &str) {
        let storage = Arc::new(MemoryStorage::new());
        storage.write("impersonation", blob).unwrap();
        let bridge = PersistenceBridge::new(storage, "impersonation");

        assert!(matches!(
            bridge.load(),
            Err(SessionError::CorruptPersistedState(_))
        ));
    }
}
