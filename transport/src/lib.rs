// Licensed under the Apache-2.0 license

//! MARS Transport Layer
//!
//! The dispatch boundary between the command marshaler and the device. A
//! transport receives an encoded command in a shared buffer and overwrites the
//! same buffer with the encoded response. It neither retries nor interprets
//! the bytes it carries.

pub mod error;
pub mod transports;

pub use error::{TransportError, TransportResult};
pub use transports::loopback::Loopback;
pub use transports::udp::{UdpTransport, MAX_DATAGRAM_SIZE};

/// Default device address for network transports
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:62222";

/// Transport configuration
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub server_address: String,
    pub timeout_ms: u32,
    pub max_message_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            server_address: DEFAULT_SERVER_ADDRESS.to_string(),
            timeout_ms: 5000,
            max_message_size: 4096,
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_address(mut self, address: impl Into<String>) -> Self {
        self.server_address = address.into();
        self
    }

    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Transport trait for device communication
pub trait Transport: Send {
    /// Send `buffer[..command_len]` to the device and write the response into
    /// `buffer`, returning the response length.
    fn dispatch(&mut self, buffer: &mut [u8], command_len: usize) -> TransportResult<usize>;

    /// Short name used in diagnostics
    fn name(&self) -> &'static str {
        "transport"
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn dispatch(&mut self, buffer: &mut [u8], command_len: usize) -> TransportResult<usize> {
        (**self).dispatch(buffer, command_len)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Copy a response into the shared exchange buffer
pub(crate) fn store_response(buffer: &mut [u8], response: &[u8]) -> TransportResult<usize> {
    if response.len() > buffer.len() {
        return Err(TransportError::MessageTooLarge {
            len: response.len(),
            capacity: buffer.len(),
        });
    }
    buffer[..response.len()].copy_from_slice(response);
    Ok(response.len())
}

/// Reject a command length that points past the buffer
pub(crate) fn command_slice(buffer: &[u8], command_len: usize) -> TransportResult<&[u8]> {
    buffer
        .get(..command_len)
        .ok_or(TransportError::InvalidCommandLength {
            command_len,
            capacity: buffer.len(),
        })
}
