//! Session error reporter.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted once per `SessionProvider` so every backend-originated listener
//! error surfaces through a single logging path, whatever component tree the
//! host app renders.

#[cfg(test)]
#[path = "error_reporter_test.rs"]
mod error_reporter_test;

use leptos::prelude::*;

use crate::net::types::SessionError;
use crate::state::snapshot::SessionSnapshot;

/// The (identity, profile) error pair last seen by the reporter.
type ReportedErrors = (Option<SessionError>, Option<SessionError>);

/// Errors newly populated relative to the previously reported pair.
///
/// An unchanged error is not re-reported; clearing and re-raising the same
/// error reports it again.
fn fresh_errors(previous: Option<&ReportedErrors>, current: &ReportedErrors) -> Vec<SessionError> {
    let (previous_user, previous_profile) =
        previous.map_or((None, None), |(user, profile)| (user.as_ref(), profile.as_ref()));

    let mut fresh = Vec::new();
    if let Some(error) = &current.0 {
        if previous_user != Some(error) {
            fresh.push(error.clone());
        }
    }
    if let Some(error) = &current.1 {
        if previous_profile != Some(error) {
            fresh.push(error.clone());
        }
    }
    fresh
}

/// Headless component: renders nothing, watches the snapshot's error slots.
#[component]
pub fn SessionErrorReporter(snapshot: Memo<SessionSnapshot>) -> impl IntoView {
    Effect::new(move |previous: Option<ReportedErrors>| {
        let current = snapshot.with(|s| (s.user_error.clone(), s.profile_error.clone()));
        for error in fresh_errors(previous.as_ref(), &current) {
            leptos::logging::warn!("backend session error: {error}");
        }
        current
    });
}
