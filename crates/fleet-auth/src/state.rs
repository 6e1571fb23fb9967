//! Single source of truth for the impersonation session.
//!
//! Holds the current value in a `watch` channel so views can observe it, and
//! mirrors every committed value through the [`PersistenceBridge`]. Storage
//! is only read at [`SessionStateStore::restore_from_storage`]; changes made
//! by another process after that are not picked up.

use fleet_core::ImpersonationSession;
use tokio::sync::watch;

use crate::error::SessionError;
use crate::persistence::PersistenceBridge;

pub struct SessionStateStore {
    bridge: PersistenceBridge,
    tx: watch::Sender<ImpersonationSession>,
}

impl SessionStateStore {
    /// Create a store holding the default (inactive) session. Call
    /// [`Self::restore_from_storage`] once at startup to adopt persisted state.
    #[must_use]
    pub fn new(bridge: PersistenceBridge) -> Self {
        let (tx, _) = watch::channel(ImpersonationSession::default());
        Self { bridge, tx }
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn get_state(&self) -> ImpersonationSession {
        self.tx.borrow().clone()
    }

    /// Persist `next`, then publish it to observers.
    ///
    /// The in-memory value only changes once storage accepted the write, so a
    /// failed commit leaves both untouched.
    ///
    /// # Errors
    ///
    /// `SessionError::Storage` if persisting fails.
    pub fn set_state(&self, next: ImpersonationSession) -> Result<(), SessionError> {
        self.bridge.persist(&next)?;
        self.tx.send_replace(next);
        Ok(())
    }

    /// Adopt the persisted session, if any.
    ///
    /// A blob that fails to parse or validate is removed and the session
    /// falls back to inactive. Never fails.
    pub fn restore_from_storage(&self) -> ImpersonationSession {
        let restored = match self.bridge.load() {
            Ok(Some(session)) => {
                if let Some(company) = session.impersonated_company() {
                    tracing::info!(company_id = %company.id, "restored impersonation session");
                }
                session
            }
            Ok(None) => ImpersonationSession::Inactive,
            Err(SessionError::CorruptPersistedState(reason)) => {
                tracing::warn!(key = self.bridge.key(), %reason, "discarding corrupt session");
                if let Err(error) = self.bridge.clear() {
                    tracing::warn!(%error, "failed to remove corrupt session");
                }
                ImpersonationSession::Inactive
            }
            Err(error) => {
                tracing::warn!(%error, "could not read persisted session; starting inactive");
                ImpersonationSession::Inactive
            }
        };
        self.tx.send_replace(restored.clone());
        restored
    }

    /// Observe session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ImpersonationSession> {
        self.tx.subscribe()
    }
}
