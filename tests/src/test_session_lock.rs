// Licensed under the Apache-2.0 license

//! Session lock contract through the session API

use crate::common::mock_session;
use mars_util_host_commands::api::mars_cmd_self_test;
use mars_util_host_session::{LockError, SessionError};
use std::sync::Arc;

#[test]
fn test_relock_from_owner_fails() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");

    session.lock().expect("Failed to lock session");
    let err = session.lock().unwrap_err();
    assert!(matches!(err, SessionError::Lock(LockError::AlreadyHeld)));

    // The original hold is still intact
    assert!(session.is_locked_by_current_thread());
    mars_cmd_self_test(&session, false).expect("SelfTest failed");
    session.unlock().expect("Failed to unlock session");
}

#[test]
fn test_unlock_without_lock_fails() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    assert!(matches!(
        session.unlock(),
        Err(SessionError::Lock(LockError::NotOwner))
    ));
}

#[test]
fn test_unlock_from_other_thread_fails() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let session = Arc::new(session);

    session.lock().expect("Failed to lock session");
    let other = Arc::clone(&session);
    let result = std::thread::spawn(move || other.unlock().map_err(|e| e.to_string()))
        .join()
        .expect("Thread panicked");

    assert!(result.is_err());
    assert!(session.is_locked_by_current_thread());
    session.unlock().expect("Failed to unlock session");
}

#[test]
fn test_guard_within_manual_lock_fails() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    session.lock().expect("Failed to lock session");
    assert!(session.guard().is_err());
    session.unlock().expect("Failed to unlock session");
}
