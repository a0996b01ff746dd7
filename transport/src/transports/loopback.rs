// Licensed under the Apache-2.0 license

//! In-process transport backed by a command handler

use crate::{command_slice, store_response, Transport, TransportResult};

/// Hands raw command bytes to a handler and returns its raw response bytes.
///
/// Used to attach emulated devices without a network hop.
pub struct Loopback<H> {
    handler: H,
}

impl<H> Loopback<H>
where
    H: FnMut(&[u8]) -> TransportResult<Vec<u8>> + Send,
{
    pub fn new(handler: H) -> Self {
        Self { handler }
    }
}

impl<H> Transport for Loopback<H>
where
    H: FnMut(&[u8]) -> TransportResult<Vec<u8>> + Send,
{
    fn dispatch(&mut self, buffer: &mut [u8], command_len: usize) -> TransportResult<usize> {
        let response = (self.handler)(command_slice(buffer, command_len)?)?;
        store_response(buffer, &response)
    }

    fn name(&self) -> &'static str {
        "loopback"
    }
}
