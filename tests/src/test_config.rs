// Licensed under the Apache-2.0 license

//! Host configuration drives session and transport setup

use crate::common::{attach, MockMars};
use mars_util_host_config::{HostConfig, PolicySetting, CONFIG_FILE_NAME};
use mars_util_host_session::{MarsSession, ResultCodePolicy};

#[test]
fn test_config_file_builds_session() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(CONFIG_FILE_NAME);

    std::fs::write(
        &path,
        r#"
[session]
buffer_size = 512
result_code_policy = "discard-payload"

[transport]
server_address = "127.0.0.1:7000"
timeout_ms = 250
"#,
    )
    .expect("Failed to write config");

    let config = HostConfig::from_file(&path).expect("Failed to load config");
    assert_eq!(config.session.result_code_policy, PolicySetting::DiscardPayload);

    let transport_config = config.transport_config();
    assert_eq!(transport_config.server_address, "127.0.0.1:7000");
    assert_eq!(transport_config.timeout_ms, 250);

    let (transport, _probe) = attach(MockMars::new());
    let session = MarsSession::attach(transport, config.session_config())
        .expect("Failed to create MarsSession");
    assert_eq!(session.config().buffer_size, 512);
    assert_eq!(
        session.config().result_code_policy,
        ResultCodePolicy::DiscardPayload
    );
    assert!(session.capabilities().is_ok());
}

#[test]
fn test_undersized_buffer_from_config_is_rejected() {
    let config = HostConfig::from_toml_str("[session]\nbuffer_size = 8").expect("Failed to parse");
    let (transport, _probe) = attach(MockMars::new());
    assert!(MarsSession::with_config(transport, config.session_config()).is_err());
}
