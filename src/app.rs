//! Root session provider and context.
//!
//! ARCHITECTURE
//! ============
//! `SessionProvider` is the coordinator between the caller's service handles
//! and the two watchers. Each watcher's listener guard lives in state held by
//! its effect, so disposing the provider's owner drops the guards and
//! deregisters both listeners without a separate teardown callback.
//!
//! TRADE-OFFS
//! ==========
//! Handles are fixed for a provider's lifetime. Swapping backends means
//! mounting a new provider, which keeps the re-subscription logic keyed on
//! identity alone.

use std::rc::Rc;

use leptos::prelude::*;

use crate::components::error_reporter::SessionErrorReporter;
use crate::net::backend::{AuthService, DocumentStore, ServiceHandles};
use crate::net::config::AppHandle;
use crate::state::identity::{IdentityBinding, IdentityEmit, IdentityState};
use crate::state::profile::{ProfileBinding, ProfileEmit, ProfileState};
use crate::state::snapshot::SessionSnapshot;

/// Scope object available to every component below a [`SessionProvider`].
///
/// Cheap to copy: the handles sit in an arena slot and the snapshot is a
/// memo key.
#[derive(Clone, Copy)]
pub struct SessionContext {
    handles: StoredValue<ServiceHandles, LocalStorage>,
    snapshot: Memo<SessionSnapshot>,
}

impl SessionContext {
    /// App handle, if one was supplied.
    pub fn app_handle(&self) -> Option<AppHandle> {
        self.handles.with_value(|handles| handles.app.clone())
    }

    /// Auth service handle, if one was supplied.
    pub fn auth_service(&self) -> Option<Rc<dyn AuthService>> {
        self.handles.with_value(|handles| handles.auth.clone())
    }

    /// Document store handle, if one was supplied.
    pub fn document_store(&self) -> Option<Rc<dyn DocumentStore>> {
        self.handles.with_value(|handles| handles.database.clone())
    }

    /// The aggregate session snapshot.
    pub fn snapshot(&self) -> Memo<SessionSnapshot> {
        self.snapshot
    }
}

/// Provides live session state to its children.
///
/// Subscribes to identity changes on `auth`, mirrors the signed-in user's
/// profile document from `database`, and exposes both through
/// [`SessionContext`]. Missing handles degrade to error/empty state instead
/// of failing the mount.
#[component]
pub fn SessionProvider(
    /// Handle from the caller's backend app initialization.
    #[prop(optional)]
    app: Option<AppHandle>,
    /// Document database handle.
    #[prop(optional)]
    database: Option<Rc<dyn DocumentStore>>,
    /// Auth service handle.
    #[prop(optional)]
    auth: Option<Rc<dyn AuthService>>,
    children: Children,
) -> impl IntoView {
    let identity = RwSignal::new(IdentityState::default());
    let profile = RwSignal::new(ProfileState::default());

    let handles = ServiceHandles::new(app, database, auth);
    let services_available = handles.all_present();

    // Identity listener: attached on the first effect run; the binding (and
    // with it the listener guard) lives as the effect's held state.
    let identity_emit: IdentityEmit =
        Rc::new(move |event| identity.update(|state| event.apply(state)));
    {
        let auth = handles.auth.clone();
        Effect::new(move |binding: Option<IdentityBinding>| {
            binding.unwrap_or_else(|| {
                let mut binding = IdentityBinding::new();
                binding.attach(auth.as_ref(), &identity_emit);
                binding
            })
        });
    }

    // Profile listener follows the identity signal. `sync` keys on the user
    // id, so identity updates that keep the same user are no-ops here.
    let profile_emit: ProfileEmit =
        Rc::new(move |event| profile.update(|state| event.apply(state)));
    {
        let database = handles.database.clone();
        Effect::new(move |binding: Option<ProfileBinding>| {
            let mut binding = binding.unwrap_or_default();
            let user = identity.with(|state| state.user.clone());
            binding.sync(database.as_ref(), user.as_ref(), &profile_emit);
            binding
        });
    }

    let snapshot = Memo::new(move |_| {
        identity.with(|identity_state| {
            profile.with(|profile_state| {
                SessionSnapshot::assemble(services_available, identity_state, profile_state)
            })
        })
    });

    provide_context(SessionContext {
        handles: StoredValue::new_local(handles),
        snapshot,
    });

    view! {
        <SessionErrorReporter snapshot=snapshot/>
        {children()}
    }
}
