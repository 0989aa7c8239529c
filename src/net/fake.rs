//! Hand-cranked backend doubles for tests.
//!
//! Listeners register through the production trait methods; tests deliver
//! events by calling the `emit_*` methods and assert on live listener counts
//! to verify the cancel-before-replace discipline.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::net::backend::{
    AuthService, DocumentRef, DocumentStore, ErrorCallback, IdentityCallback, ListenerGuard,
    SnapshotCallback,
};
use crate::net::types::SessionUser;

// =============================================================
// FakeAuth
// =============================================================

#[derive(Clone, Default)]
pub struct FakeAuth {
    inner: Rc<AuthInner>,
}

#[derive(Default)]
struct AuthInner {
    next_id: Cell<usize>,
    listeners: RefCell<BTreeMap<usize, (IdentityCallback, ErrorCallback)>>,
}

impl AuthService for FakeAuth {
    fn on_identity_change(&self, on_event: IdentityCallback, on_error: ErrorCallback) -> ListenerGuard {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().insert(id, (on_event, on_error));

        let inner = Rc::clone(&self.inner);
        ListenerGuard::new(move || {
            inner.listeners.borrow_mut().remove(&id);
        })
    }
}

impl FakeAuth {
    /// Deliver an identity-change event to every registered listener.
    pub fn emit_identity(&self, user: Option<SessionUser>) {
        let callbacks: Vec<IdentityCallback> =
            self.inner.listeners.borrow().values().map(|(ev, _)| Rc::clone(ev)).collect();
        for callback in callbacks {
            callback(user.clone());
        }
    }

    /// Deliver a listener-level error to every registered listener.
    pub fn emit_error(&self, message: &str) {
        let callbacks: Vec<ErrorCallback> =
            self.inner.listeners.borrow().values().map(|(_, err)| Rc::clone(err)).collect();
        for callback in callbacks {
            callback(message.to_owned());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

// =============================================================
// FakeStore
// =============================================================

#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Rc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    next_id: Cell<usize>,
    watches: RefCell<BTreeMap<usize, Watch>>,
}

struct Watch {
    doc: DocumentRef,
    on_event: SnapshotCallback,
    on_error: ErrorCallback,
}

impl DocumentStore for FakeStore {
    fn watch_document(
        &self,
        doc: &DocumentRef,
        on_event: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> ListenerGuard {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.watches.borrow_mut().insert(
            id,
            Watch {
                doc: doc.clone(),
                on_event,
                on_error,
            },
        );

        let inner = Rc::clone(&self.inner);
        ListenerGuard::new(move || {
            inner.watches.borrow_mut().remove(&id);
        })
    }
}

impl FakeStore {
    /// Deliver a snapshot event to every watch on `doc`. `None` models a
    /// missing document.
    pub fn emit_snapshot(&self, doc: &DocumentRef, data: Option<Value>) {
        let callbacks: Vec<SnapshotCallback> = self
            .inner
            .watches
            .borrow()
            .values()
            .filter(|watch| watch.doc == *doc)
            .map(|watch| Rc::clone(&watch.on_event))
            .collect();
        for callback in callbacks {
            callback(data.clone());
        }
    }

    /// Deliver a listener-level error to every watch on `doc`.
    pub fn emit_watch_error(&self, doc: &DocumentRef, message: &str) {
        let callbacks: Vec<ErrorCallback> = self
            .inner
            .watches
            .borrow()
            .values()
            .filter(|watch| watch.doc == *doc)
            .map(|watch| Rc::clone(&watch.on_error))
            .collect();
        for callback in callbacks {
            callback(message.to_owned());
        }
    }

    pub fn watch_count(&self) -> usize {
        self.inner.watches.borrow().len()
    }

    /// Documents currently under watch, in registration order.
    pub fn watched_docs(&self) -> Vec<DocumentRef> {
        self.inner.watches.borrow().values().map(|watch| watch.doc.clone()).collect()
    }
}
