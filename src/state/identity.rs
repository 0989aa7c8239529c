//! Identity watcher: the signed-in user, live from the auth service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionProvider` attaches one [`IdentityBinding`] for its lifetime and
//! routes emitted events into the identity signal. The profile watcher keys
//! off the user this watcher reports.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::rc::Rc;

use crate::net::backend::{AuthService, ErrorCallback, IdentityCallback, ListenerGuard};
use crate::net::types::{SessionError, SessionUser};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityState {
    pub user: Option<SessionUser>,
    pub loading: bool,
    pub error: Option<SessionError>,
}

impl Default for IdentityState {
    /// Loading until the first identity event arrives.
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

/// One delivery from the identity listener, or a setup failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdentityEvent {
    /// Identity-change event; `None` means signed out.
    Changed(Option<SessionUser>),
    /// Listener-level error from the auth service.
    Failed(String),
    /// No auth service handle was supplied.
    Unavailable,
}

impl IdentityEvent {
    pub fn apply(self, state: &mut IdentityState) {
        match self {
            Self::Changed(user) => {
                state.user = user;
                state.loading = false;
                state.error = None;
            }
            Self::Failed(message) => {
                state.user = None;
                state.loading = false;
                state.error = Some(SessionError::AuthListener(message));
            }
            Self::Unavailable => {
                state.user = None;
                state.loading = false;
                state.error = Some(SessionError::ServiceUnavailable);
            }
        }
    }
}

/// Sink for identity events, owned by the provider.
pub type IdentityEmit = Rc<dyn Fn(IdentityEvent)>;

/// Owns the single active identity listener.
///
/// Dropping the binding (or calling [`detach`](Self::detach)) deregisters the
/// listener; attaching cancels any previous listener first.
#[derive(Default)]
pub struct IdentityBinding {
    guard: Option<ListenerGuard>,
}

impl IdentityBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the identity listener, or report the auth service as missing.
    pub fn attach(&mut self, auth: Option<&Rc<dyn AuthService>>, emit: &IdentityEmit) {
        self.detach();

        let Some(auth) = auth else {
            emit(IdentityEvent::Unavailable);
            return;
        };

        let on_event: IdentityCallback = {
            let emit = Rc::clone(emit);
            Rc::new(move |user| emit(IdentityEvent::Changed(user)))
        };
        let on_error: ErrorCallback = {
            let emit = Rc::clone(emit);
            Rc::new(move |message: String| {
                leptos::logging::warn!("identity listener error: {message}");
                emit(IdentityEvent::Failed(message));
            })
        };
        self.guard = Some(auth.on_identity_change(on_event, on_error));
    }

    /// Deregister the active listener, if any.
    pub fn detach(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.cancel();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.guard.is_some()
    }
}
