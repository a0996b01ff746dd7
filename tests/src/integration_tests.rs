// Licensed under the Apache-2.0 license

//! End-to-end scenarios against the emulated device

use crate::common::{mock_session, sha256, test_constants::*};
use mars_util_host_commands::api::{
    mars_cmd_capability_get, mars_cmd_pcr_extend, mars_cmd_reg_read, mars_cmd_self_test,
    mars_cmd_sequence_complete, mars_cmd_sequence_hash, mars_cmd_sequence_update, MarsApiError,
};
use mars_util_host_command_types::PropertyTag;
use mars_util_host_session::{LockError, SessionError};

#[test]
fn test_capability_query_digest_length() {
    println!("Testing digest length capability query...");

    let (session, _probe) = mock_session().expect("Failed to create MarsSession");

    session.lock().expect("Failed to lock session");
    let digest_len = mars_cmd_capability_get(&session, PropertyTag::LenDigest);
    session.unlock().expect("Failed to unlock session");

    let digest_len = digest_len.expect("Capability query failed");
    println!("Digest length: {}", digest_len);
    assert!(digest_len > 0);
    assert_eq!(digest_len as usize, DIGEST_LEN);
}

#[test]
fn test_hash_sequence_matches_cached_digest_length() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let caps = session.capabilities().expect("Capabilities not cached");

    let mut digest = vec![0u8; caps.digest_len as usize];
    session.lock().expect("Failed to lock session");
    mars_cmd_sequence_hash(&session).expect("SequenceHash failed");
    let returned =
        mars_cmd_sequence_update(&session, TEST_MESSAGE, &mut []).expect("SequenceUpdate failed");
    let len = mars_cmd_sequence_complete(&session, &mut digest).expect("SequenceComplete failed");
    session.unlock().expect("Failed to unlock session");

    assert_eq!(returned, 0);
    assert_eq!(len, caps.digest_len as usize);
    assert_eq!(digest, sha256(&[TEST_MESSAGE]));
}

#[test]
fn test_extend_then_read_register() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let measurement = sha256(&[b"measurement"]);

    let _guard = session.guard().expect("Failed to lock session");
    mars_cmd_pcr_extend(&session, 0, &measurement).expect("PcrExtend failed");

    let mut pcr = [0u8; DIGEST_LEN];
    let len = mars_cmd_reg_read(&session, 0, &mut pcr).expect("RegRead failed");

    assert_eq!(len, DIGEST_LEN);
    assert_eq!(pcr, sha256(&[&[0u8; DIGEST_LEN], &measurement]));
}

#[test]
fn test_repeated_extends_are_deterministic() {
    let measurement = sha256(&[b"boot stage"]);
    let mut results = Vec::new();

    for _ in 0..2 {
        let (session, _probe) = mock_session().expect("Failed to create MarsSession");
        let _guard = session.guard().expect("Failed to lock session");
        mars_cmd_pcr_extend(&session, 3, &measurement).expect("PcrExtend failed");
        mars_cmd_pcr_extend(&session, 3, &measurement).expect("PcrExtend failed");

        let mut pcr = [0u8; DIGEST_LEN];
        mars_cmd_reg_read(&session, 3, &mut pcr).expect("RegRead failed");
        results.push(pcr);
    }

    let once = sha256(&[&[0u8; DIGEST_LEN], &measurement]);
    assert_eq!(results[0], results[1]);
    assert_eq!(results[0], sha256(&[&once, &measurement]));
}

#[test]
fn test_command_without_lock_is_rejected() {
    let (session, probe) = mock_session().expect("Failed to create MarsSession");
    let calls_before = probe.calls();

    let err = mars_cmd_self_test(&session, true).unwrap_err();
    assert!(matches!(
        err,
        MarsApiError::Session(SessionError::Lock(LockError::NotHeld))
    ));

    let mut pcr = [0u8; DIGEST_LEN];
    let err = mars_cmd_reg_read(&session, 0, &mut pcr).unwrap_err();
    assert!(matches!(
        err,
        MarsApiError::Session(SessionError::Lock(LockError::NotHeld))
    ));

    assert_eq!(probe.calls(), calls_before);
}

#[test]
fn test_self_test_passes() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let _guard = session.guard().expect("Failed to lock session");
    mars_cmd_self_test(&session, true).expect("SelfTest failed");
    mars_cmd_self_test(&session, false).expect("SelfTest failed");
}
