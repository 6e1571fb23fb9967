use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Required input state is missing (active tokens, cached identity).
    /// Nothing was mutated; the caller should refresh or log in again.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// Internal state contradicts the session invariants. Indicates a defect.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The persisted session blob could not be parsed or failed validation.
    #[error("corrupt persisted session: {0}")]
    CorruptPersistedState(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error("identity cache error: {0}")]
    IdentityCache(String),
}
