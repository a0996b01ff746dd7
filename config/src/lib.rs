// Licensed under the Apache-2.0 license

//! Host configuration file (`mars-host.toml`)
//!
//! Every section and key is optional; anything missing takes its default.

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use mars_util_host_session::{ResultCodePolicy, SessionConfig, DEFAULT_BUFFER_SIZE};
use mars_util_host_transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for by [`HostConfig::load_default`]
pub const CONFIG_FILE_NAME: &str = "mars-host.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub session: SessionSection,
    pub transport: TransportSection,
    pub logging: LoggingSection,
}

/// `[session]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    pub buffer_size: usize,
    pub result_code_policy: PolicySetting,
}

/// Handling of payloads that accompany a nonzero result code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicySetting {
    #[default]
    DecodePayload,
    DiscardPayload,
}

/// `[transport]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSection {
    pub server_address: String,
    pub timeout_ms: u32,
    pub max_message_size: usize,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// One of off, error, warn, info, debug, trace
    pub level: String,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            result_code_policy: PolicySetting::default(),
        }
    }
}

impl Default for TransportSection {
    fn default() -> Self {
        let defaults = TransportConfig::default();
        Self {
            server_address: defaults.server_address,
            timeout_ms: defaults.timeout_ms,
            max_message_size: defaults.max_message_size,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl From<PolicySetting> for ResultCodePolicy {
    fn from(setting: PolicySetting) -> Self {
        match setting {
            PolicySetting::DecodePayload => ResultCodePolicy::DecodePayload,
            PolicySetting::DiscardPayload => ResultCodePolicy::DiscardPayload,
        }
    }
}

impl HostConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).with_context(|| "Failed to parse TOML configuration")
    }

    /// Search the working directory and its parents for `mars-host.toml`,
    /// falling back to defaults
    pub fn load_default() -> Result<Self> {
        let mut current_dir = std::env::current_dir()?;

        loop {
            let config_path = current_dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::from_file(config_path);
            }

            if let Some(parent) = current_dir.parent() {
                current_dir = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        std::fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            buffer_size: self.session.buffer_size,
            result_code_policy: self.session.result_code_policy.into(),
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig::new()
            .with_server_address(self.transport.server_address.clone())
            .with_timeout(self.transport.timeout_ms)
            .with_max_message_size(self.transport.max_message_size)
    }

    pub fn log_level(&self) -> Result<LevelFilter> {
        self.logging
            .level
            .parse()
            .map_err(|_| anyhow!("Invalid log level: {}", self.logging.level))
    }
}
