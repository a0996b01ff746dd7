// Licensed under the Apache-2.0 license

//! Session Management
//!
//! [`MarsSession`] is the context object every command goes through. It owns
//! the session lock, the shared command/response buffer, the transport and
//! the capability cache.
//!
//! Locking is the caller's job. `execute` only checks that the calling thread
//! holds the lock, so a multi-command sequence such as hash start, update and
//! complete can be made atomic with one `lock()`/`unlock()` pair.

pub mod capabilities;
pub mod lock;
pub mod packing;

pub use capabilities::{CacheState, CapabilityCache};
pub use lock::{LockError, LockResult, SessionGuard, SessionLock};

use mars_util_host_command_types::{
    Capabilities, CommandError, CommandFormat, FormatDescriptor, LengthSource, MarsCommandCode,
    Output, Param, PropertyTag, ResultCode, CAPABILITY_GET,
};
use mars_util_host_osal::{Mutex, OsalError};
use mars_util_host_transport::{Transport, TransportError};
use thiserror::Error;

/// Default size of the shared command/response buffer
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Smallest accepted command/response buffer
pub const MIN_BUFFER_SIZE: usize = 64;

/// Session error enumeration
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Lock contract violation: {0}")]
    Lock(#[from] LockError),

    /// Nothing was sent to the transport
    #[error("Encoding error: {0}")]
    Encoding(CommandError),

    #[error("Transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("Decoding error: {0}")]
    Decoding(CommandError),

    #[error("Capability cache is poisoned")]
    CapabilityPoisoned,

    #[error("Capability cache is not initialized")]
    CapabilityUninitialized,

    #[error("Capability query {property:?} failed: {code}")]
    CapabilityQuery {
        property: PropertyTag,
        code: ResultCode,
    },

    #[error("Capability query {0:?} returned zero")]
    ZeroCapability(PropertyTag),

    #[error("Configuration error: {0}")]
    Configuration(&'static str),

    #[error("OSAL error: {0}")]
    Osal(#[from] OsalError),
}

/// Session result type
pub type SessionResult<T> = Result<T, SessionError>;

/// Handling of output values that accompany a nonzero result code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultCodePolicy {
    /// Decode and write the value if the device sent one
    #[default]
    DecodePayload,
    /// Return the code without touching any output location
    DiscardPayload,
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub buffer_size: usize,
    pub result_code_policy: ResultCodePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            result_code_policy: ResultCodePolicy::default(),
        }
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatistics {
    pub commands_sent: u64,
    pub commands_succeeded: u64,
    /// Exchanges that completed with a nonzero result code
    pub device_failures: u64,
    /// Exchanges that failed in the transport or while decoding
    pub commands_failed: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
}

/// State touched by one command/response exchange
struct Exchange {
    buffer: Vec<u8>,
    transport: Box<dyn Transport>,
    stats: SessionStatistics,
}

/// Device session context
pub struct MarsSession {
    lock: SessionLock,
    exchange: Mutex<Exchange>,
    capabilities: CapabilityCache,
    config: SessionConfig,
}

impl MarsSession {
    /// Create a session with the default configuration
    pub fn new(transport: impl Transport + 'static) -> SessionResult<Self> {
        Self::with_config(transport, SessionConfig::default())
    }

    /// Create session with custom configuration
    pub fn with_config(
        transport: impl Transport + 'static,
        config: SessionConfig,
    ) -> SessionResult<Self> {
        if config.buffer_size < MIN_BUFFER_SIZE {
            return Err(SessionError::Configuration("Buffer size below minimum"));
        }

        log::debug!(
            "Creating session over {} transport, {} byte buffer",
            transport.name(),
            config.buffer_size
        );

        Ok(Self {
            lock: SessionLock::new(),
            exchange: Mutex::new(Exchange {
                buffer: vec![0u8; config.buffer_size],
                transport: Box::new(transport),
                stats: SessionStatistics::default(),
            }),
            capabilities: CapabilityCache::new(),
            config,
        })
    }

    /// Create a session and populate the capability cache.
    ///
    /// An initialization failure is logged and leaves the cache poisoned; the
    /// session is still returned so commands without implicit lengths work.
    pub fn attach(transport: impl Transport + 'static, config: SessionConfig) -> SessionResult<Self> {
        let session = Self::with_config(transport, config)?;
        if let Err(err) = session.initialize() {
            log::warn!("Capability initialization failed: {}", err);
        }
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn lock(&self) -> SessionResult<()> {
        Ok(self.lock.lock()?)
    }

    pub fn unlock(&self) -> SessionResult<()> {
        Ok(self.lock.unlock()?)
    }

    /// Hold the session lock until the guard is dropped
    pub fn guard(&self) -> SessionResult<SessionGuard<'_>> {
        Ok(self.lock.guard()?)
    }

    pub fn is_locked_by_current_thread(&self) -> bool {
        self.lock.is_held_by_current_thread()
    }

    /// Query digest, signature and key-identifier lengths under one lock hold
    pub fn initialize(&self) -> SessionResult<Capabilities> {
        let result = {
            let _guard = self.guard()?;
            self.query_capabilities()
        };

        match result {
            Ok(caps) => {
                self.capabilities.store(caps)?;
                log::debug!(
                    "Capabilities: digest {} signature {} key id {}",
                    caps.digest_len,
                    caps.signature_len,
                    caps.key_id_len
                );
                Ok(caps)
            }
            Err(err) => {
                self.capabilities.poison()?;
                log::warn!("Capability cache poisoned: {}", err);
                Err(err)
            }
        }
    }

    fn query_capabilities(&self) -> SessionResult<Capabilities> {
        Ok(Capabilities {
            digest_len: self.query_length(LengthSource::Digest)?,
            signature_len: self.query_length(LengthSource::Signature)?,
            key_id_len: self.query_length(LengthSource::KeyId)?,
        })
    }

    fn query_length(&self, source: LengthSource) -> SessionResult<u16> {
        let property = source.property();
        let mut value = 0u16;
        let code = self.execute(
            &CAPABILITY_GET,
            &[Param::Half(property.into())],
            Output::Half(&mut value),
        )?;

        if !code.is_success() {
            return Err(SessionError::CapabilityQuery { property, code });
        }
        if value == 0 {
            return Err(SessionError::ZeroCapability(property));
        }
        Ok(value)
    }

    /// Cached capability lengths, failing fast if the cache is not ready
    pub fn capabilities(&self) -> SessionResult<Capabilities> {
        self.capabilities.get()
    }

    pub fn capability_state(&self) -> SessionResult<CacheState> {
        self.capabilities.state()
    }

    pub fn stats(&self) -> SessionResult<SessionStatistics> {
        Ok(self.exchange.lock()?.stats.clone())
    }

    /// Execute a command from the static command table.
    ///
    /// The caller must hold the session lock. Parameters and output location
    /// are checked against `format` before anything is encoded.
    pub fn execute(
        &self,
        format: &CommandFormat,
        params: &[Param<'_>],
        output: Output<'_>,
    ) -> SessionResult<ResultCode> {
        self.ensure_locked()?;
        format
            .check(params, &output)
            .map_err(SessionError::Encoding)?;
        self.exchange_command(format.name, format.code, params, output)
    }

    /// Execute with a textual format descriptor such as `"Xhwx"`
    pub fn execute_described(
        &self,
        descriptor: &str,
        code: MarsCommandCode,
        params: &[Param<'_>],
        output: Output<'_>,
    ) -> SessionResult<ResultCode> {
        self.ensure_locked()?;
        let format = FormatDescriptor::parse(descriptor).map_err(SessionError::Encoding)?;
        format
            .check(params, &output)
            .map_err(SessionError::Encoding)?;
        self.exchange_command(descriptor, code, params, output)
    }

    /// Execute with the signature implied by `params` and `output`
    pub fn execute_raw(
        &self,
        code: MarsCommandCode,
        params: &[Param<'_>],
        output: Output<'_>,
    ) -> SessionResult<ResultCode> {
        self.ensure_locked()?;
        output.check_capacity().map_err(SessionError::Encoding)?;
        self.exchange_command("raw", code, params, output)
    }

    /// Fail with [`LockError::NotHeld`] unless the calling thread holds the lock
    pub fn ensure_locked(&self) -> SessionResult<()> {
        if !self.lock.is_held_by_current_thread() {
            log::warn!("Command issued without holding the session lock");
            return Err(LockError::NotHeld.into());
        }
        Ok(())
    }

    fn exchange_command(
        &self,
        name: &str,
        code: MarsCommandCode,
        params: &[Param<'_>],
        output: Output<'_>,
    ) -> SessionResult<ResultCode> {
        let mut exchange = self.exchange.lock()?;
        let Exchange {
            buffer,
            transport,
            stats,
        } = &mut *exchange;

        let command_len =
            packing::encode_command(buffer, code.into(), params).map_err(SessionError::Encoding)?;

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{} command {}", name, packing::render(&buffer[..command_len]));
        }

        stats.commands_sent += 1;
        stats.bytes_sent += command_len as u64;

        let capacity = buffer.len();
        let dispatched = transport
            .dispatch(buffer, command_len)
            .and_then(|len| {
                if len > capacity {
                    return Err(TransportError::MessageTooLarge { len, capacity });
                }
                Ok(len)
            });
        let response_len = match dispatched {
            Ok(len) => len,
            Err(err) => {
                log::error!("{} dispatch over {} failed: {}", name, transport.name(), err);
                stats.commands_failed += 1;
                return Err(err.into());
            }
        };
        stats.bytes_received += response_len as u64;

        let response = &buffer[..response_len];
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{} response {}", name, packing::render(response));
        }

        match packing::decode_response(response, self.config.result_code_policy, output) {
            Ok(code) if code.is_success() => {
                stats.commands_succeeded += 1;
                Ok(code)
            }
            Ok(code) => {
                log::warn!("{} returned {}", name, code);
                stats.device_failures += 1;
                Ok(code)
            }
            Err(err) => {
                stats.commands_failed += 1;
                Err(SessionError::Decoding(err))
            }
        }
    }
}
