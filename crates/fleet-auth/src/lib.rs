//! # fleet-auth
//!
//! Impersonation session management for the fleet admin dashboard.
//!
//! A super-administrator can temporarily assume a company administrator's
//! credentials and identity, act on their behalf, and return to their own
//! identity. The saved original credentials are persisted before the active
//! slot is overwritten, so a crash or reload never locks the caller out.
//!
//! ```no_run
//! use std::sync::Arc;
//! use fleet_auth::navigator::LogNavigator;
//! use fleet_auth::store::{MemoryCredentialStore, MemoryIdentityCache, MemoryStorage};
//! use fleet_auth::{Collaborators, ImpersonationManager};
//! use fleet_core::{AdminData, CredentialPair, IdentitySummary, Role};
//!
//! let manager = ImpersonationManager::new(
//!     Collaborators {
//!         storage: Arc::new(MemoryStorage::new()),
//!         credentials: Arc::new(MemoryCredentialStore::with_active(CredentialPair::new("S1", "S2"))),
//!         identity: Arc::new(MemoryIdentityCache::new()),
//!         navigator: Arc::new(LogNavigator),
//!     },
//!     &fleet_config::FleetConfig::default(),
//! );
//!
//! manager.start_impersonation("co42", "Acme", AdminData {
//!     identity: IdentitySummary::new("Acme Admin", "admin@acme.test", Role::Admin),
//!     tokens: CredentialPair::new("A1", "A2"),
//! })?;
//! manager.end_impersonation()?;
//! # Ok::<(), fleet_auth::SessionError>(())
//! ```

pub mod bus;
pub mod error;
pub mod manager;
pub mod navigator;
pub mod persistence;
pub mod state;
pub mod store;

pub use bus::{ChangeBus, IdentityChangeKind, IdentityChanged};
pub use error::SessionError;
pub use manager::{Collaborators, ImpersonationManager};
pub use navigator::Navigator;
pub use persistence::PersistenceBridge;
pub use state::SessionStateStore;
