// Licensed under the Apache-2.0 license

//! Sessions over the UDP datagram transport

use crate::common::{init_logging, sha256, test_constants::*, DeviceServer, MockMars};
use mars_util_host_commands::api::{mars_cmd_capability_get, mars_cmd_hash, MarsApiError};
use mars_util_host_command_types::PropertyTag;
use mars_util_host_session::{MarsSession, SessionConfig, SessionError};
use mars_util_host_transport::{TransportConfig, TransportError, UdpTransport};
use std::thread;
use std::time::Duration;

#[test]
fn test_session_over_udp() {
    init_logging();
    let server = DeviceServer::spawn(MockMars::new()).expect("Failed to start device server");

    let config = TransportConfig::new().with_server_address(server.addr().to_string());
    let transport = UdpTransport::with_config(&config).expect("Failed to create UDP transport");
    let session = MarsSession::attach(transport, SessionConfig::default())
        .expect("Failed to create MarsSession");

    let caps = session.capabilities().expect("Capabilities not cached");
    assert_eq!(caps.digest_len as usize, DIGEST_LEN);

    let _guard = session.guard().expect("Failed to lock session");
    let alg = mars_cmd_capability_get(&session, PropertyTag::AlgHash).expect("Query failed");
    assert_eq!(alg, ALG_SHA256);

    let mut digest = [0u8; DIGEST_LEN];
    mars_cmd_hash(&session, TEST_MESSAGE, &mut digest).expect("Hash failed");
    assert_eq!(digest, sha256(&[TEST_MESSAGE]));
}

#[test]
fn test_silent_device_times_out() {
    init_logging();
    let server = DeviceServer::spawn_with(|_| None).expect("Failed to start device server");

    let config = TransportConfig::new()
        .with_server_address(server.addr().to_string())
        .with_timeout(100);
    let transport = UdpTransport::with_config(&config).expect("Failed to create UDP transport");
    let session = MarsSession::new(transport).expect("Failed to create MarsSession");

    let _guard = session.guard().expect("Failed to lock session");
    let err = mars_cmd_capability_get(&session, PropertyTag::LenDigest).unwrap_err();
    assert!(matches!(
        err,
        MarsApiError::Session(SessionError::Transport(TransportError::Timeout))
    ));
}

#[test]
fn test_oversized_datagram_is_rejected() {
    init_logging();
    let server =
        DeviceServer::spawn_with(|_| Some(vec![0u8; 200])).expect("Failed to start device server");

    let config = TransportConfig::new()
        .with_server_address(server.addr().to_string())
        .with_timeout(1000);
    let transport = UdpTransport::with_config(&config).expect("Failed to create UDP transport");
    let session = MarsSession::with_config(
        transport,
        SessionConfig {
            buffer_size: 128,
            ..SessionConfig::default()
        },
    )
    .expect("Failed to create MarsSession");

    let _guard = session.guard().expect("Failed to lock session");
    let err = mars_cmd_capability_get(&session, PropertyTag::LenDigest).unwrap_err();
    assert!(matches!(
        err,
        MarsApiError::Session(SessionError::Transport(TransportError::MessageTooLarge {
            len: 200,
            capacity: 128
        }))
    ));
}

#[test]
fn test_invalid_address_is_rejected() {
    let config = TransportConfig::new().with_server_address("not an address");
    assert!(matches!(
        UdpTransport::with_config(&config),
        Err(TransportError::ConfigurationError(_))
    ));
}

#[test]
fn test_late_reply_is_not_taken_for_next_command() {
    init_logging();
    let mut replies = 0u32;
    let server = DeviceServer::spawn_with(move |_| {
        replies += 1;
        if replies == 1 {
            // Answer the first query only after the host has given up; [0, 111]
            thread::sleep(Duration::from_millis(300));
            return Some(vec![0x82, 0x00, 0x18, 0x6f]);
        }
        // [0, 32]
        Some(vec![0x82, 0x00, 0x18, 0x20])
    })
    .expect("Failed to start device server");

    let config = TransportConfig::new()
        .with_server_address(server.addr().to_string())
        .with_timeout(100);
    let transport = UdpTransport::with_config(&config).expect("Failed to create UDP transport");
    let session = MarsSession::new(transport).expect("Failed to create MarsSession");
    let _guard = session.guard().expect("Failed to lock session");

    let err = mars_cmd_capability_get(&session, PropertyTag::LenDigest).unwrap_err();
    assert!(matches!(
        err,
        MarsApiError::Session(SessionError::Transport(TransportError::Timeout))
    ));

    thread::sleep(Duration::from_millis(500));
    let len = mars_cmd_capability_get(&session, PropertyTag::LenDigest).expect("Query failed");
    assert_eq!(len, 32);
}
