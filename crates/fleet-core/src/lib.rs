//! # fleet-core
//!
//! Core types shared by the fleet admin dashboard crates.
//!
//! - Roles and identity summaries for cached user records
//! - Opaque credential pairs for the active credential slot
//! - The impersonation session aggregate and its persisted document shape
//! - Cross-cutting error types

pub mod errors;
pub mod identity;
pub mod role;
pub mod session;

pub use errors::CoreError;
pub use identity::{AdminData, CompanyRef, CredentialPair, IdentitySummary};
pub use role::Role;
pub use session::{ActiveImpersonation, ImpersonationSession, OriginalUser, SessionDocument};
