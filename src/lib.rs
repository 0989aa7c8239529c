//! # livesession
//!
//! Reactive session state for Leptos apps backed by a remote auth + document
//! service. `SessionProvider` subscribes to the backend's identity stream and
//! to the signed-in user's profile document, merges both into one
//! [`SessionSnapshot`](state::snapshot::SessionSnapshot), and exposes it to
//! the component tree through context accessors.
//!
//! The backend SDK itself stays behind the trait seam in [`net::backend`];
//! this crate owns subscription lifecycles and state synchronization, not
//! auth, storage, or transport.

pub mod app;
pub mod components;
pub mod hooks;
pub mod net;
pub mod state;
pub mod util;

pub use app::{SessionContext, SessionProvider};
pub use hooks::{use_app_handle, use_auth_service, use_document_store, use_session, use_user};
pub use net::backend::{AuthService, DocumentRef, DocumentStore, ListenerGuard, ServiceHandles};
pub use net::config::{AppHandle, BackendConfig};
pub use net::types::{SessionError, SessionUser};
pub use state::snapshot::{SessionSnapshot, UserView};
pub use util::memo::{Tagged, TaggedMemo, use_tagged_memo};
