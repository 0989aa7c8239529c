use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::net::fake::FakeAuth;

// =============================================================
// Helpers
// =============================================================

fn make_user(id: &str) -> SessionUser {
    SessionUser {
        id: id.to_owned(),
        name: Some("Alice".to_owned()),
        email: Some("alice@example.com".to_owned()),
        avatar_url: None,
    }
}

fn make_sink() -> (Rc<RefCell<IdentityState>>, IdentityEmit) {
    let state = Rc::new(RefCell::new(IdentityState::default()));
    let emit: IdentityEmit = {
        let state = Rc::clone(&state);
        Rc::new(move |event| event.apply(&mut state.borrow_mut()))
    };
    (state, emit)
}

// =============================================================
// IdentityState defaults
// =============================================================

#[test]
fn initial_state_is_loading_with_no_user_and_no_error() {
    let state = IdentityState::default();
    assert!(state.user.is_none());
    assert!(state.loading);
    assert!(state.error.is_none());
}

// =============================================================
// IdentityEvent transitions
// =============================================================

#[test]
fn identity_event_sets_user_and_clears_loading() {
    let mut state = IdentityState::default();
    IdentityEvent::Changed(Some(make_user("u-1"))).apply(&mut state);
    assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn signed_out_event_clears_user_without_error() {
    let mut state = IdentityState::default();
    IdentityEvent::Changed(Some(make_user("u-1"))).apply(&mut state);
    IdentityEvent::Changed(None).apply(&mut state);
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert!(state.error.is_none());
}

#[test]
fn listener_failure_clears_user_and_records_error() {
    let mut state = IdentityState::default();
    IdentityEvent::Changed(Some(make_user("u-1"))).apply(&mut state);
    IdentityEvent::Failed("token expired".to_owned()).apply(&mut state);
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.error, Some(SessionError::AuthListener("token expired".to_owned())));
}

#[test]
fn missing_service_records_unavailable_error() {
    let mut state = IdentityState::default();
    IdentityEvent::Unavailable.apply(&mut state);
    assert!(state.user.is_none());
    assert!(!state.loading);
    assert_eq!(state.error, Some(SessionError::ServiceUnavailable));
}

#[test]
fn identity_event_clears_a_previous_error() {
    let mut state = IdentityState::default();
    IdentityEvent::Failed("boom".to_owned()).apply(&mut state);
    IdentityEvent::Changed(Some(make_user("u-1"))).apply(&mut state);
    assert!(state.error.is_none());
    assert!(state.user.is_some());
}

// =============================================================
// IdentityBinding lifecycle
// =============================================================

#[test]
fn attach_without_auth_service_reports_unavailable_immediately() {
    let (state, emit) = make_sink();
    let mut binding = IdentityBinding::new();
    binding.attach(None, &emit);
    assert!(!binding.is_attached());
    assert_eq!(state.borrow().error, Some(SessionError::ServiceUnavailable));
}

#[test]
fn attach_registers_exactly_one_listener() {
    let auth = FakeAuth::default();
    let handle: Rc<dyn AuthService> = Rc::new(auth.clone());
    let (state, emit) = make_sink();

    let mut binding = IdentityBinding::new();
    binding.attach(Some(&handle), &emit);
    assert!(binding.is_attached());
    assert_eq!(auth.listener_count(), 1);
    // No event yet: still loading.
    assert!(state.borrow().loading);
}

#[test]
fn reattach_cancels_the_previous_listener_first() {
    let auth = FakeAuth::default();
    let handle: Rc<dyn AuthService> = Rc::new(auth.clone());
    let (_state, emit) = make_sink();

    let mut binding = IdentityBinding::new();
    binding.attach(Some(&handle), &emit);
    binding.attach(Some(&handle), &emit);
    assert_eq!(auth.listener_count(), 1);
}

#[test]
fn events_flow_from_the_service_into_state() {
    let auth = FakeAuth::default();
    let handle: Rc<dyn AuthService> = Rc::new(auth.clone());
    let (state, emit) = make_sink();

    let mut binding = IdentityBinding::new();
    binding.attach(Some(&handle), &emit);

    auth.emit_identity(Some(make_user("u-1")));
    assert_eq!(state.borrow().user.as_ref().map(|u| u.id.as_str()), Some("u-1"));
    assert!(!state.borrow().loading);

    auth.emit_error("stream closed");
    assert!(state.borrow().user.is_none());
    assert_eq!(
        state.borrow().error,
        Some(SessionError::AuthListener("stream closed".to_owned()))
    );
}

#[test]
fn detach_deregisters_the_listener() {
    let auth = FakeAuth::default();
    let handle: Rc<dyn AuthService> = Rc::new(auth.clone());
    let (_state, emit) = make_sink();

    let mut binding = IdentityBinding::new();
    binding.attach(Some(&handle), &emit);
    binding.detach();
    assert!(!binding.is_attached());
    assert_eq!(auth.listener_count(), 0);
}

#[test]
fn dropping_the_binding_deregisters_the_listener() {
    let auth = FakeAuth::default();
    let handle: Rc<dyn AuthService> = Rc::new(auth.clone());
    let (_state, emit) = make_sink();

    {
        let mut binding = IdentityBinding::new();
        binding.attach(Some(&handle), &emit);
        assert_eq!(auth.listener_count(), 1);
    }
    assert_eq!(auth.listener_count(), 0);
}
