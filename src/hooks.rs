//! Accessors for the session scope.
//!
//! DESIGN
//! ======
//! `use_session` is the root accessor; the rest are narrow projections so
//! components can depend on exactly the slice they render. All of them are
//! context reads; no state lives here.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::rc::Rc;

use leptos::prelude::*;

use crate::app::SessionContext;
use crate::net::backend::{AuthService, DocumentStore};
use crate::net::config::AppHandle;
use crate::state::snapshot::{SessionSnapshot, UserView};

/// Root accessor for the session scope.
///
/// # Panics
///
/// Panics when called outside a `<SessionProvider/>` subtree. That is a
/// programmer error, so failing at the call site beats limping along with
/// absent state.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("use_session must be called inside a <SessionProvider/> subtree")
}

/// The app handle held by the nearest provider, if one was supplied.
pub fn use_app_handle() -> Option<AppHandle> {
    use_session().app_handle()
}

/// The auth service handle held by the nearest provider, if one was supplied.
pub fn use_auth_service() -> Option<Rc<dyn AuthService>> {
    use_session().auth_service()
}

/// The document store handle held by the nearest provider, if one was
/// supplied.
pub fn use_document_store() -> Option<Rc<dyn DocumentStore>> {
    use_session().document_store()
}

/// The user+profile bundle, memoized over the session snapshot.
pub fn use_user() -> Memo<UserView> {
    let snapshot = use_session().snapshot();
    Memo::new(move |_| snapshot.with(SessionSnapshot::user_view))
}
