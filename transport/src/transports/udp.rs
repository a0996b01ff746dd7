// Licensed under the Apache-2.0 license

//! UDP datagram transport
//!
//! One command datagram out, one response datagram back. The socket is bound
//! lazily on first dispatch.

use crate::{
    command_slice, store_response, Transport, TransportConfig, TransportError, TransportResult,
};
use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

/// Largest payload a single UDP datagram can carry
pub const MAX_DATAGRAM_SIZE: usize = 65_535;

pub struct UdpTransport {
    socket: Option<UdpSocket>,
    server_addr: SocketAddr,
    timeout: Option<Duration>,
    max_message_size: usize,
    scratch: Vec<u8>,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self::build(server_addr, &TransportConfig::default())
    }

    pub fn with_config(config: &TransportConfig) -> TransportResult<Self> {
        let server_addr = config
            .server_address
            .parse()
            .map_err(|_| TransportError::ConfigurationError("Invalid server address"))?;
        Ok(Self::build(server_addr, config))
    }

    fn build(server_addr: SocketAddr, config: &TransportConfig) -> Self {
        let timeout = match config.timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms as u64)),
        };
        let max_message_size = config.max_message_size.min(MAX_DATAGRAM_SIZE);
        Self {
            socket: None,
            server_addr,
            timeout,
            max_message_size,
            // One spare byte marks a datagram larger than the limit
            scratch: vec![0u8; max_message_size + 1],
        }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    pub fn is_connected(&self) -> bool {
        self.socket.is_some()
    }

    pub fn connect(&mut self) -> TransportResult<()> {
        let local: SocketAddr = if self.server_addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            ([0u16; 8], 0).into()
        };

        let socket = UdpSocket::bind(local)
            .map_err(|_| TransportError::ConnectionFailed("Failed to bind UDP socket"))?;
        socket
            .set_read_timeout(self.timeout)
            .map_err(|_| TransportError::ConnectionFailed("Failed to set read timeout"))?;
        socket
            .set_write_timeout(self.timeout)
            .map_err(|_| TransportError::ConnectionFailed("Failed to set write timeout"))?;

        log::debug!("UDP transport bound, device at {}", self.server_addr);
        self.socket = Some(socket);
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.socket = None;
    }
}

impl Transport for UdpTransport {
    fn dispatch(&mut self, buffer: &mut [u8], command_len: usize) -> TransportResult<usize> {
        if self.socket.is_none() {
            self.connect()?;
        }
        let socket = self
            .socket
            .as_ref()
            .ok_or(TransportError::ConnectionFailed("Socket not bound"))?;

        discard_stale(socket, &mut self.scratch)?;

        socket
            .send_to(command_slice(buffer, command_len)?, self.server_addr)
            .map_err(TransportError::SendFailed)?;

        loop {
            let (received, from) = socket.recv_from(&mut self.scratch).map_err(|err| {
                match err.kind() {
                    ErrorKind::WouldBlock | ErrorKind::TimedOut => TransportError::Timeout,
                    _ => TransportError::ReceiveFailed(err),
                }
            })?;

            if from != self.server_addr {
                log::warn!("Dropping {} byte datagram from {}", received, from);
                continue;
            }

            if received > self.max_message_size {
                return Err(TransportError::MessageTooLarge {
                    len: received,
                    capacity: self.max_message_size,
                });
            }

            return store_response(buffer, &self.scratch[..received]);
        }
    }

    fn name(&self) -> &'static str {
        "udp"
    }
}

/// Drop datagrams queued before this command was sent, such as a reply that
/// arrived after an earlier exchange timed out.
fn discard_stale(socket: &UdpSocket, scratch: &mut [u8]) -> TransportResult<()> {
    socket
        .set_nonblocking(true)
        .map_err(|_| TransportError::ConnectionFailed("Failed to set non-blocking mode"))?;

    let drained = loop {
        match socket.recv_from(scratch) {
            Ok((received, from)) => {
                log::warn!("Discarding stale {} byte datagram from {}", received, from);
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => break Ok(()),
            Err(err) => break Err(TransportError::ReceiveFailed(err)),
        }
    };

    socket
        .set_nonblocking(false)
        .map_err(|_| TransportError::ConnectionFailed("Failed to restore blocking mode"))?;
    drained
}
