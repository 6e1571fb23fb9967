use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::role::Role;

/// Opaque access/refresh bearer token pair.
///
/// The dashboard never inspects token contents; validation belongs to the
/// authentication service. `Debug` output is redacted so a pair can travel
/// through `tracing` fields without leaking credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl CredentialPair {
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Both tokens are present. Blank tokens never count as a credential.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.refresh_token.trim().is_empty()
    }
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Cached display and role metadata for a user.
///
/// Not authoritative for authorization. Used to render the header and to
/// restore role-based UI after resuming an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IdentitySummary {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl IdentitySummary {
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

/// The company whose administrator is being impersonated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyRef {
    pub id: String,
    pub name: String,
}

impl CompanyRef {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Identity and credentials of the company administrator to assume,
/// as returned by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AdminData {
    pub identity: IdentitySummary,
    pub tokens: CredentialPair,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_tokens() {
        let pair = CredentialPair::new("secret-access", "secret-refresh");
        let rendered = format!("{pair:?}");
        assert!(!rendered.contains("secret-access"));
        assert!(!rendered.contains("secret-refresh"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn credential_pair_uses_camel_case_keys() {
        let value = serde_json::to_value(CredentialPair::new("A1", "A2")).unwrap();
        assert_eq!(value["accessToken"], "A1");
        assert_eq!(value["refreshToken"], "A2");
    }

    #[test]
    fn blank_tokens_are_incomplete() {
        assert!(CredentialPair::new("a", "b").is_complete());
        assert!(!CredentialPair::new("", "b").is_complete());
        assert!(!CredentialPair::new("a", "   ").is_complete());
    }

    #[test]
    fn identity_uses_wire_role_names() {
        let identity = IdentitySummary::new("Root", "root@fleet.local", Role::SuperAdmin);
        let value = serde_json::to_value(&identity).unwrap();
        assert_eq!(value["role"], "SUPER_ADMIN");
        assert_eq!(value["name"], "Root");
    }
}
