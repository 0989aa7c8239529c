//! Session DTOs shared across the backend seam.
//!
//! DESIGN
//! ======
//! These types mirror what the backend attaches to an authenticated session
//! so serde round-trips stay lossless. Listener failures are plain values:
//! they land in watcher state for the UI to render, never in a panic.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The authenticated principal as delivered by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Unique user identifier assigned by the backend.
    pub id: String,
    /// Display name, if the account has one.
    pub name: Option<String>,
    /// Primary email address, if shared by the auth method.
    pub email: Option<String>,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
}

/// Errors surfaced through watcher state.
///
/// Accessor misuse (calling a hook outside `SessionProvider`) is a programmer
/// error and panics at the call site instead of appearing here.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The auth service handle was not supplied to the provider.
    #[error("auth service not provided")]
    ServiceUnavailable,
    /// The identity-change listener reported a failure.
    #[error("identity listener failed: {0}")]
    AuthListener(String),
    /// The profile document listener reported a failure.
    #[error("profile listener failed: {0}")]
    ProfileListener(String),
}
