use super::*;

// =============================================================
// Helpers
// =============================================================

fn auth_err(message: &str) -> SessionError {
    SessionError::AuthListener(message.to_owned())
}

fn profile_err(message: &str) -> SessionError {
    SessionError::ProfileListener(message.to_owned())
}

// =============================================================
// fresh_errors dedup
// =============================================================

#[test]
fn first_observation_reports_populated_slots() {
    let current = (Some(auth_err("boom")), None);
    assert_eq!(fresh_errors(None, &current), vec![auth_err("boom")]);
}

#[test]
fn clean_snapshot_reports_nothing() {
    assert!(fresh_errors(None, &(None, None)).is_empty());
}

#[test]
fn unchanged_errors_are_not_re_reported() {
    let pair = (Some(auth_err("boom")), Some(profile_err("denied")));
    assert!(fresh_errors(Some(&pair), &pair).is_empty());
}

#[test]
fn changed_error_is_reported_again() {
    let previous = (Some(auth_err("first")), None);
    let current = (Some(auth_err("second")), None);
    assert_eq!(fresh_errors(Some(&previous), &current), vec![auth_err("second")]);
}

#[test]
fn error_returning_after_a_clear_is_reported_again() {
    let raised = (Some(auth_err("boom")), None);
    let cleared = (None, None);
    assert!(fresh_errors(Some(&raised), &cleared).is_empty());
    assert_eq!(fresh_errors(Some(&cleared), &raised), vec![auth_err("boom")]);
}

#[test]
fn both_slots_report_independently() {
    let previous = (Some(auth_err("boom")), None);
    let current = (Some(auth_err("boom")), Some(profile_err("denied")));
    assert_eq!(fresh_errors(Some(&previous), &current), vec![profile_err("denied")]);
}
