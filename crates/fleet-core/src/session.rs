//! The impersonation session aggregate.
//!
//! In memory the session is an enum, so "impersonating" and "original user +
//! company present" cannot drift apart. On disk it is a flat
//! [`SessionDocument`] whose linkage is checked on the way back in.
//!
//! ```text
//! Inactive ──start──→ Active { original_user, company } ──end──→ Inactive
//! ```

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::identity::{CompanyRef, CredentialPair, IdentitySummary};

/// The super-admin identity and credentials saved while impersonating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OriginalUser {
    pub identity: IdentitySummary,
    pub tokens: CredentialPair,
}

/// Payload of an active impersonation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveImpersonation {
    pub original_user: OriginalUser,
    pub company: CompanyRef,
    /// `None` for sessions persisted before start times were recorded.
    pub started_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImpersonationSession {
    #[default]
    Inactive,
    Active(ActiveImpersonation),
}

impl ImpersonationSession {
    /// Build an active session that started now.
    #[must_use]
    pub fn begin(original_user: OriginalUser, company: CompanyRef) -> Self {
        Self::Active(ActiveImpersonation {
            original_user,
            company,
            started_at: Some(Utc::now()),
        })
    }

    #[must_use]
    pub const fn is_impersonating(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    #[must_use]
    pub const fn original_user(&self) -> Option<&OriginalUser> {
        match self {
            Self::Active(active) => Some(&active.original_user),
            Self::Inactive => None,
        }
    }

    #[must_use]
    pub const fn impersonated_company(&self) -> Option<&CompanyRef> {
        match self {
            Self::Active(active) => Some(&active.company),
            Self::Inactive => None,
        }
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active(active) => active.started_at,
            Self::Inactive => None,
        }
    }

    /// Flatten into the persisted document shape.
    #[must_use]
    pub fn to_document(&self) -> SessionDocument {
        SessionDocument::from(self)
    }
}

/// Persisted JSON representation of an [`ImpersonationSession`].
///
/// ```json
/// {
///   "isImpersonating": true,
///   "originalUser": { "identity": { ... }, "tokens": { ... } },
///   "impersonatedCompany": { "id": "co42", "name": "Acme" },
///   "startedAt": "2026-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionDocument {
    pub is_impersonating: bool,
    #[serde(default)]
    pub original_user: Option<OriginalUser>,
    #[serde(default)]
    pub impersonated_company: Option<CompanyRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl From<&ImpersonationSession> for SessionDocument {
    fn from(session: &ImpersonationSession) -> Self {
        match session {
            ImpersonationSession::Inactive => Self {
                is_impersonating: false,
                original_user: None,
                impersonated_company: None,
                started_at: None,
            },
            ImpersonationSession::Active(active) => Self {
                is_impersonating: true,
                original_user: Some(active.original_user.clone()),
                impersonated_company: Some(active.company.clone()),
                started_at: active.started_at,
            },
        }
    }
}

impl TryFrom<SessionDocument> for ImpersonationSession {
    type Error = CoreError;

    fn try_from(doc: SessionDocument) -> Result<Self, Self::Error> {
        match (doc.is_impersonating, doc.original_user, doc.impersonated_company) {
            (false, None, None) => Ok(Self::Inactive),
            (false, _, _) => Err(CoreError::Validation(
                "inactive session carries original user or company".into(),
            )),
            (true, Some(original_user), Some(company)) => {
                if !original_user.tokens.is_complete() {
                    return Err(CoreError::Validation(
                        "original user tokens are blank".into(),
                    ));
                }
                if company.id.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "impersonated company id is blank".into(),
                    ));
                }
                Ok(Self::Active(ActiveImpersonation {
                    original_user,
                    company,
                    started_at: doc.started_at,
                }))
            }
            (true, original_user, company) => Err(CoreError::Validation(format!(
                "active session is missing {}",
                match (original_user.is_some(), company.is_some()) {
                    (false, false) => "original user and company",
                    (false, true) => "original user",
                    _ => "company",
                }
            ))),
        }
    }
}
