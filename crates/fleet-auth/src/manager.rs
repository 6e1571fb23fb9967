//! Start and end impersonation: the credential swap and its bookkeeping.
//!
//! Ordering rule for both directions: durable state (the persisted session,
//! the credential slot) is written before any navigation, and the session
//! holding the original tokens is persisted before the active slot is
//! overwritten.

use std::sync::Arc;

use fleet_config::{FleetConfig, NavigationConfig, SessionConfig};
use fleet_core::{
    AdminData, CompanyRef, CredentialPair, IdentitySummary, ImpersonationSession, OriginalUser,
    Role,
};
use tokio::sync::{broadcast, watch};

use crate::bus::{ChangeBus, IdentityChangeKind, IdentityChanged};
use crate::error::SessionError;
use crate::navigator::Navigator;
use crate::persistence::PersistenceBridge;
use crate::state::SessionStateStore;
use crate::store::{CredentialStore, IdentityCache, KeyValueStorage};

const MISSING_SESSION: &str = "missing current session";

/// External collaborators the manager drives.
pub struct Collaborators {
    pub storage: Arc<dyn KeyValueStorage>,
    pub credentials: Arc<dyn CredentialStore>,
    pub identity: Arc<dyn IdentityCache>,
    pub navigator: Arc<dyn Navigator>,
}

pub struct ImpersonationManager {
    state: SessionStateStore,
    credentials: Arc<dyn CredentialStore>,
    identity: Arc<dyn IdentityCache>,
    navigator: Arc<dyn Navigator>,
    bus: ChangeBus,
    session_config: SessionConfig,
    navigation: NavigationConfig,
}

impl ImpersonationManager {
    /// Build the manager and restore any persisted session.
    ///
    /// A corrupt persisted session is discarded here; construction never fails.
    #[must_use]
    pub fn new(collaborators: Collaborators, config: &FleetConfig) -> Self {
        let bridge = PersistenceBridge::new(collaborators.storage, &config.session.storage_key);
        let state = SessionStateStore::new(bridge);
        state.restore_from_storage();

        Self {
            state,
            credentials: collaborators.credentials,
            identity: collaborators.identity,
            navigator: collaborators.navigator,
            bus: ChangeBus::default(),
            session_config: config.session.clone(),
            navigation: config.navigation.clone(),
        }
    }

    /// Read-only snapshot of the session.
    #[must_use]
    pub fn session_state(&self) -> ImpersonationSession {
        self.state.get_state()
    }

    #[must_use]
    pub fn is_impersonating(&self) -> bool {
        self.state.get_state().is_impersonating()
    }

    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<ImpersonationSession> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn subscribe_changes(&self) -> broadcast::Receiver<IdentityChanged> {
        self.bus.subscribe()
    }

    /// Assume the identity of a company administrator.
    ///
    /// Saves the caller's tokens and identity in the persisted session, then
    /// swaps the active credential slot and current-user cache to `admin`,
    /// publishes a change notification and navigates to the company admin
    /// dashboard.
    ///
    /// # Errors
    ///
    /// - `Precondition` if there are no active credentials, an impersonation
    ///   is already running, the target data is incomplete, or (with
    ///   `strict_identity`) the current-user cache is empty. Nothing is mutated.
    /// - `InvariantViolation` if `admin.tokens` equals the active pair.
    /// - Store errors if a write fails. Completed steps are rolled back and
    ///   the session is cleared once the original tokens are active again.
    pub fn start_impersonation(
        &self,
        company_id: &str,
        company_name: &str,
        admin: AdminData,
    ) -> Result<(), SessionError> {
        if let Some(company) = self.state.get_state().impersonated_company() {
            return Err(SessionError::Precondition(format!(
                "already impersonating company {}",
                company.id
            )));
        }

        let tokens = self
            .credentials
            .get_active()?
            .filter(CredentialPair::is_complete)
            .ok_or_else(|| SessionError::Precondition(MISSING_SESSION.into()))?;

        if company_id.trim().is_empty() {
            return Err(SessionError::Precondition("company id is required".into()));
        }
        if !admin.tokens.is_complete() {
            return Err(SessionError::Precondition(
                "target credentials are incomplete".into(),
            ));
        }
        if admin.tokens == tokens {
            tracing::error!(company_id, "target credentials equal the active credentials");
            return Err(SessionError::InvariantViolation(
                "target credentials match the active session".into(),
            ));
        }

        let identity = self.current_identity()?;
        let original = OriginalUser { identity, tokens };
        let company = CompanyRef::new(company_id, company_name);

        self.state.set_state(ImpersonationSession::begin(
            original.clone(),
            company.clone(),
        ))?;

        if let Err(error) = self.swap_in(&admin.tokens, &admin.identity) {
            tracing::error!(%error, company_id, "identity swap failed; rolling back");
            self.rollback_start(&original);
            return Err(error);
        }

        self.bus.publish(IdentityChanged {
            kind: IdentityChangeKind::Started,
            identity: admin.identity,
            company: Some(company),
        });
        tracing::info!(company_id, company_name, "impersonation started");

        self.navigate(&self.navigation.company_admin_dashboard);
        Ok(())
    }

    /// Return to the saved original identity.
    ///
    /// # Errors
    ///
    /// - `InvariantViolation` if no impersonation is active. Nothing is
    ///   mutated, so calling this twice is safe.
    /// - Store errors if the original credentials cannot be restored. The
    ///   session stays active and the call can be retried. A failed
    ///   current-user cache write is only logged.
    pub fn end_impersonation(&self) -> Result<(), SessionError> {
        let ImpersonationSession::Active(active) = self.state.get_state() else {
            tracing::error!("end_impersonation called with no active session");
            return Err(SessionError::InvariantViolation(
                "no original session to restore".into(),
            ));
        };

        let original = active.original_user;
        self.credentials.set_active(&original.tokens)?;
        if let Err(error) = self.identity.set(&original.identity) {
            tracing::warn!(%error, "credentials restored; current-user cache not updated");
        }

        self.state.set_state(ImpersonationSession::Inactive)?;
        tracing::info!(company_id = %active.company.id, "impersonation ended");

        self.bus.publish(IdentityChanged {
            kind: IdentityChangeKind::Ended,
            identity: original.identity,
            company: None,
        });

        self.navigate(&self.navigation.super_admin_dashboard);
        Ok(())
    }

    /// The cached identity of the caller, or a placeholder when the cache is
    /// empty (unless `strict_identity` is set).
    fn current_identity(&self) -> Result<IdentitySummary, SessionError> {
        if let Some(identity) = self.identity.get()? {
            if !identity.role.can_impersonate() {
                tracing::warn!(role = %identity.role, "starting impersonation from a non super-admin identity");
            }
            return Ok(identity);
        }

        if self.session_config.strict_identity {
            return Err(SessionError::Precondition(MISSING_SESSION.into()));
        }

        tracing::warn!("current-user cache is empty; saving placeholder identity for original user");
        Ok(IdentitySummary::new(
            self.session_config.placeholder_name.clone(),
            self.session_config.placeholder_email.clone(),
            Role::SuperAdmin,
        ))
    }

    fn swap_in(
        &self,
        tokens: &CredentialPair,
        identity: &IdentitySummary,
    ) -> Result<(), SessionError> {
        self.credentials.set_active(tokens)?;
        self.identity.set(identity)
    }

    /// Best-effort undo of a half-finished start.
    ///
    /// The session is cleared as soon as the active slot holds the original
    /// tokens again. It is kept only when that cannot be confirmed, since it
    /// is then the sole copy of those tokens.
    fn rollback_start(&self, original: &OriginalUser) {
        if let Err(error) = self.credentials.set_active(&original.tokens) {
            tracing::error!(%error, "failed to restore original credentials during rollback");
            let unchanged = matches!(
                self.credentials.get_active(),
                Ok(Some(ref active)) if *active == original.tokens
            );
            if !unchanged {
                return;
            }
        }
        if let Err(error) = self.identity.set(&original.identity) {
            tracing::warn!(%error, "failed to restore current-user cache during rollback");
        }
        if let Err(error) = self.state.set_state(ImpersonationSession::Inactive) {
            tracing::error!(%error, "failed to clear session during rollback");
        }
    }

    fn navigate(&self, route: &str) {
        self.navigator.go_to(route);
        if self.navigation.force_reload {
            self.navigator.reload(route, self.navigation.reload_delay());
        }
    }
}
