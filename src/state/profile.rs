//! Profile watcher: the signed-in user's profile document, live from the
//! document store.
//!
//! ARCHITECTURE
//! ============
//! [`ProfileBinding::sync`] is called whenever identity state changes. It
//! re-subscribes only when the user id actually changed, and always cancels
//! the outgoing listener before registering its replacement so two listeners
//! never write the same state slot. No identity (or no store) means no
//! profile; that path clears state without recording an error.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::rc::Rc;

use serde_json::Value;

use crate::net::backend::{DocumentStore, ErrorCallback, ListenerGuard, SnapshotCallback};
use crate::net::types::{SessionError, SessionUser};

/// Collection holding one profile document per user, keyed by user id.
pub const PROFILE_COLLECTION: &str = "users";

/// Profile document state for the current user.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ProfileState {
    pub profile: Option<Value>,
    pub loading: bool,
    pub error: Option<SessionError>,
}

/// One delivery from the profile listener, or a lifecycle transition.
#[derive(Clone, Debug, PartialEq)]
pub enum ProfileEvent {
    /// No subscription target: signed out or store missing.
    Detached,
    /// A new subscription started; resolution is pending.
    Loading,
    /// Snapshot event; `None` means the document does not exist.
    Snapshot(Option<Value>),
    /// Listener-level error from the document store.
    Failed(String),
}

impl ProfileEvent {
    pub fn apply(self, state: &mut ProfileState) {
        match self {
            Self::Detached => *state = ProfileState::default(),
            Self::Loading => {
                // Keep the previously fetched profile visible until the new
                // snapshot resolves.
                state.loading = true;
                state.error = None;
            }
            Self::Snapshot(data) => {
                state.profile = data;
                state.loading = false;
                state.error = None;
            }
            Self::Failed(message) => {
                state.profile = None;
                state.loading = false;
                state.error = Some(SessionError::ProfileListener(message));
            }
        }
    }
}

/// Sink for profile events, owned by the provider.
pub type ProfileEmit = Rc<dyn Fn(ProfileEvent)>;

/// Owns the single active profile-document listener and its subscription key.
#[derive(Default)]
pub struct ProfileBinding {
    active: Option<ActiveWatch>,
}

struct ActiveWatch {
    user_id: String,
    guard: ListenerGuard,
}

impl ProfileBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the subscription with the current store handle and user.
    pub fn sync(
        &mut self,
        store: Option<&Rc<dyn DocumentStore>>,
        user: Option<&SessionUser>,
        emit: &ProfileEmit,
    ) {
        let target = match (store, user) {
            (Some(store), Some(user)) => Some((store, user)),
            _ => None,
        };

        let Some((store, user)) = target else {
            if let Some(active) = self.active.take() {
                active.guard.cancel();
            }
            emit(ProfileEvent::Detached);
            return;
        };

        // Only an identity change retriggers; the same user keeps the
        // existing listener untouched.
        if self.active.as_ref().is_some_and(|active| active.user_id == user.id) {
            return;
        }

        // Cancel before replace.
        if let Some(active) = self.active.take() {
            active.guard.cancel();
        }

        emit(ProfileEvent::Loading);

        let doc = store.doc(PROFILE_COLLECTION, &user.id);
        let on_event: SnapshotCallback = {
            let emit = Rc::clone(emit);
            Rc::new(move |data| emit(ProfileEvent::Snapshot(data)))
        };
        let on_error: ErrorCallback = {
            let emit = Rc::clone(emit);
            let user_id = user.id.clone();
            Rc::new(move |message: String| {
                leptos::logging::warn!("profile listener error for user {user_id}: {message}");
                emit(ProfileEvent::Failed(message));
            })
        };
        let guard = store.watch_document(&doc, on_event, on_error);
        self.active = Some(ActiveWatch {
            user_id: user.id.clone(),
            guard,
        });
    }

    /// Id of the user the active subscription is keyed to, if any.
    pub fn active_user_id(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.user_id.as_str())
    }
}
