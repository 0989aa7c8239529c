//! Aggregate session snapshot.
//!
//! DESIGN
//! ======
//! Pure merge of handle availability with both watcher states. `PartialEq`
//! matters: the provider wraps [`SessionSnapshot::assemble`] in a `Memo`, so
//! downstream consumers only see a new snapshot when an input actually
//! changed.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde_json::Value;

use crate::net::types::{SessionError, SessionUser};
use crate::state::identity::IdentityState;
use crate::state::profile::ProfileState;

/// One immutable combined view of handles + identity + profile state.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    /// True iff all three service handles were supplied.
    pub services_available: bool,
    pub user: Option<SessionUser>,
    pub user_loading: bool,
    pub user_error: Option<SessionError>,
    pub profile: Option<Value>,
    pub profile_loading: bool,
    pub profile_error: Option<SessionError>,
}

impl SessionSnapshot {
    pub fn assemble(services_available: bool, identity: &IdentityState, profile: &ProfileState) -> Self {
        Self {
            services_available,
            user: identity.user.clone(),
            user_loading: identity.loading,
            user_error: identity.error.clone(),
            profile: profile.profile.clone(),
            profile_loading: profile.loading,
            profile_error: profile.error.clone(),
        }
    }

    /// The user+profile bundle consumers get from `use_user`.
    pub fn user_view(&self) -> UserView {
        UserView {
            user: self.user.clone(),
            profile: self.profile.clone(),
            user_loading: self.user_loading,
            profile_loading: self.profile_loading,
            user_error: self.user_error.clone(),
            profile_error: self.profile_error.clone(),
        }
    }
}

/// Narrow projection of the snapshot: the user, their profile document, and
/// both load/error slots. No handle availability.
#[derive(Clone, Debug, PartialEq)]
pub struct UserView {
    pub user: Option<SessionUser>,
    pub profile: Option<Value>,
    pub user_loading: bool,
    pub profile_loading: bool,
    pub user_error: Option<SessionError>,
    pub profile_error: Option<SessionError>,
}
