// Licensed under the Apache-2.0 license

//! Key derivation commands

use crate::common::{mock_session, sha256, skdf, test_constants::*};
use mars_util_host_commands::api::{
    mars_cmd_derive, mars_cmd_dp_derive, mars_cmd_pcr_extend, mars_cmd_public_read, MarsApiError,
};
use mars_util_host_command_types::ResultCode;

const CONTEXT: &[u8] = b"CompoundDeviceID";

#[test]
fn test_derive_matches_kdf() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let measurement = sha256(&[b"layer 0"]);

    let _guard = session.guard().expect("Failed to lock session");
    mars_cmd_pcr_extend(&session, 0, &measurement).expect("PcrExtend failed");

    let mut id = [0u8; KEY_LEN];
    let len = mars_cmd_derive(&session, 1, CONTEXT, &mut id).expect("Derive failed");
    assert_eq!(len, KEY_LEN);

    let pcr0 = sha256(&[&[0u8; DIGEST_LEN], &measurement]);
    let mut input = pcr0.to_vec();
    input.extend_from_slice(CONTEXT);
    assert_eq!(Some(id), skdf(&DEVICE_SECRET, b"D", &input));
}

#[test]
fn test_dp_derive_changes_derived_keys() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let _guard = session.guard().expect("Failed to lock session");

    let mut before = [0u8; KEY_LEN];
    mars_cmd_derive(&session, 1, CONTEXT, &mut before).expect("Derive failed");

    mars_cmd_dp_derive(&session, 0, b"XYZZY").expect("DpDerive failed");

    let mut after = [0u8; KEY_LEN];
    mars_cmd_derive(&session, 1, CONTEXT, &mut after).expect("Derive failed");
    assert_ne!(before, after);

    let parent = skdf(&DEVICE_SECRET, b"X", b"XYZZY").expect("KDF failed");
    let mut input = [0u8; DIGEST_LEN].to_vec();
    input.extend_from_slice(CONTEXT);
    assert_eq!(Some(after), skdf(&parent, b"D", &input));
}

#[test]
fn test_derive_rejects_unknown_registers() {
    let (session, _probe) = mock_session().expect("Failed to create MarsSession");
    let _guard = session.guard().expect("Failed to lock session");

    let mut id = [0u8; KEY_LEN];
    let err = mars_cmd_derive(&session, 1 << PCR_COUNT, CONTEXT, &mut id).unwrap_err();
    assert_eq!(err.result_code(), Some(ResultCode::REG));
}

#[test]
fn test_public_read_is_not_implemented() {
    let (session, probe) = mock_session().expect("Failed to create MarsSession");
    let calls_before = probe.calls();
    let _guard = session.guard().expect("Failed to lock session");

    let mut public = [0u8; 64];
    let err = mars_cmd_public_read(&session, true, b"", &mut public).unwrap_err();
    assert!(matches!(err, MarsApiError::NotImplemented("PublicRead")));
    assert_eq!(probe.calls(), calls_before);
}
