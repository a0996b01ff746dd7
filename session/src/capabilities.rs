// Licensed under the Apache-2.0 license

//! Capability Cache

use crate::{SessionError, SessionResult};
use mars_util_host_command_types::{Capabilities, LengthSource};
use mars_util_host_osal::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    #[default]
    Uninitialized,
    Ready(Capabilities),
    /// Initialization failed; dependent commands must not run
    Poisoned,
}

#[derive(Debug, Default)]
pub struct CapabilityCache {
    state: RwLock<CacheState>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionResult<CacheState> {
        Ok(*self.state.read()?)
    }

    pub fn get(&self) -> SessionResult<Capabilities> {
        match self.state()? {
            CacheState::Ready(caps) => Ok(caps),
            CacheState::Poisoned => Err(SessionError::CapabilityPoisoned),
            CacheState::Uninitialized => Err(SessionError::CapabilityUninitialized),
        }
    }

    pub fn len_of(&self, source: LengthSource) -> SessionResult<usize> {
        Ok(self.get()?.len_of(source))
    }

    pub(crate) fn store(&self, caps: Capabilities) -> SessionResult<()> {
        *self.state.write()? = CacheState::Ready(caps);
        Ok(())
    }

    pub(crate) fn poison(&self) -> SessionResult<()> {
        *self.state.write()? = CacheState::Poisoned;
        Ok(())
    }
}
