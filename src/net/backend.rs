//! Subscription seam over the backend SDK.
//!
//! DESIGN
//! ======
//! The SDK's listener-with-unsubscribe idiom maps onto callbacks plus a
//! [`ListenerGuard`] disposer. Guards deregister exactly once (explicitly or
//! when dropped), so holding a guard inside component-owned state ties the
//! listener's lifetime to the owning scope.
//!
//! SYSTEM CONTEXT
//! ==============
//! Watchers in `state` consume these traits; they never see a concrete SDK.
//! Everything runs on the UI thread, hence `Rc` callbacks.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::rc::Rc;

use crate::net::config::AppHandle;
use crate::net::types::SessionUser;

/// Success callback for identity-change events. `None` means signed out.
pub type IdentityCallback = Rc<dyn Fn(Option<SessionUser>)>;

/// Success callback for document snapshot events. `None` means the document
/// does not exist.
pub type SnapshotCallback = Rc<dyn Fn(Option<serde_json::Value>)>;

/// Failure callback carrying the backend's error message.
pub type ErrorCallback = Rc<dyn Fn(String)>;

/// Identity side of the backend SDK.
pub trait AuthService {
    /// Register a listener for identity-change events and listener-level
    /// errors. Events are delivered asynchronously, never from within this
    /// call. Dropping the returned guard deregisters the listener.
    fn on_identity_change(&self, on_event: IdentityCallback, on_error: ErrorCallback) -> ListenerGuard;
}

/// Document side of the backend SDK.
pub trait DocumentStore {
    /// Build a reference addressing one document in a named collection.
    fn doc(&self, collection: &str, doc_id: &str) -> DocumentRef {
        DocumentRef::new(collection, doc_id)
    }

    /// Register a snapshot listener on `doc`. Same callback/guard shape as
    /// [`AuthService::on_identity_change`].
    fn watch_document(
        &self,
        doc: &DocumentRef,
        on_event: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> ListenerGuard;
}

/// Address of a single document: collection name plus document id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentRef {
    collection: String,
    doc_id: String,
}

impl DocumentRef {
    pub fn new(collection: &str, doc_id: &str) -> Self {
        Self {
            collection: collection.to_owned(),
            doc_id: doc_id.to_owned(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }
}

/// Disposer returned by every subscription.
///
/// The deregistration closure runs at most once: on the first of explicit
/// [`cancel`](Self::cancel) or drop. A listener must be cancelled before a
/// replacement is registered so two listeners never write the same state
/// slot; storing the guard in the slot-owning scope enforces that ordering.
pub struct ListenerGuard {
    deregister: Option<Box<dyn FnOnce()>>,
}

impl ListenerGuard {
    pub fn new(deregister: impl FnOnce() + 'static) -> Self {
        Self {
            deregister: Some(Box::new(deregister)),
        }
    }

    /// Guard with nothing to deregister.
    pub fn noop() -> Self {
        Self { deregister: None }
    }

    /// Deregister now instead of at drop time.
    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(deregister) = self.deregister.take() {
            deregister();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("pending", &self.deregister.is_some())
            .finish()
    }
}

/// The three externally-owned service handles a provider holds.
///
/// Immutable for the provider's lifetime; this crate only reads them.
#[derive(Clone, Default)]
pub struct ServiceHandles {
    pub app: Option<AppHandle>,
    pub database: Option<Rc<dyn DocumentStore>>,
    pub auth: Option<Rc<dyn AuthService>>,
}

impl ServiceHandles {
    pub fn new(
        app: Option<AppHandle>,
        database: Option<Rc<dyn DocumentStore>>,
        auth: Option<Rc<dyn AuthService>>,
    ) -> Self {
        Self { app, database, auth }
    }

    /// True iff all three handles are present. Partial availability counts as
    /// full unavailability.
    pub fn all_present(&self) -> bool {
        self.app.is_some() && self.database.is_some() && self.auth.is_some()
    }
}
