//! Cross-cutting error types for the dashboard crates.
//!
//! Domain-specific errors (e.g. `SessionError`, `ConfigError`) live in their
//! respective crates. This module only covers failures raised by the shared
//! data model itself.

use thiserror::Error;

/// Errors that can be raised by the core data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (shape, linkage, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
