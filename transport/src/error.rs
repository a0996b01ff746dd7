// Licensed under the Apache-2.0 license

//! Transport error types

use thiserror::Error;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(&'static str),

    /// Send operation failed
    #[error("Send failed")]
    SendFailed(#[source] std::io::Error),

    /// Receive operation failed
    #[error("Receive failed")]
    ReceiveFailed(#[source] std::io::Error),

    /// No response within the configured timeout
    #[error("Operation timeout")]
    Timeout,

    /// Response does not fit in the exchange buffer
    #[error("Message too large: {len} bytes, capacity {capacity}")]
    MessageTooLarge { len: usize, capacity: usize },

    /// Command length exceeds the exchange buffer
    #[error("Invalid command length {command_len} for a {capacity} byte buffer")]
    InvalidCommandLength { command_len: usize, capacity: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(&'static str),

    /// The device endpoint failed to produce a response
    #[error("Device endpoint error: {0}")]
    Endpoint(String),
}
