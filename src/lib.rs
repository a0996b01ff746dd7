// Licensed under the Apache-2.0 license

//! MARS Utility Host Library
//!
//! Host-side access to a MARS (Measurement and Attestation RootS) device.
//! Commands travel as CBOR arrays over a pluggable transport; one session
//! serializes every exchange and caches the device's capability lengths.
//!
//! - **command-types**: opcodes, result codes, parameter and output descriptors
//! - **transport**: request/response boundary with loopback and UDP implementations
//! - **session**: cross-call session lock, CBOR marshaler, capability cache
//! - **commands**: one typed `mars_cmd_*` function per device command
//! - **config**: `mars-host.toml` loading
//! - **osal**: synchronization and thread primitives
//!
//! ## Architecture Overview
//!
//! ```text
//!     ┌─────────────────┐    ┌─────────────────┐
//!     │ mars-           │    │ mars-           │
//!     │ commands        │    │ command-types   │
//!     │ (Typed API)     │    │ (Descriptors)   │
//!     └─────────────────┘    └─────────────────┘
//!              │                       │
//!              └───────────────────────┘
//!                          │
//!             ┌──────────────────┐
//!             │ mars-session     │
//!             │ (Lock, CBOR,     │
//!             │  capabilities)   │
//!             └──────────────────┘
//!                      │
//!             ┌──────────────────┐
//!             │ mars-transport   │
//!             │ (Loopback, UDP)  │
//!             └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mars_util_host::{mars_cmd_hash, MarsSession, UdpTransport};
//!
//! let mut transport = UdpTransport::new("127.0.0.1:62222".parse()?);
//! transport.connect()?;
//!
//! let session = MarsSession::new(transport)?;
//! session.initialize()?;
//!
//! let _guard = session.guard()?;
//! let mut digest = [0u8; 32];
//! let len = mars_cmd_hash(&session, b"measured data", &mut digest)?;
//! println!("digest: {:02x?}", &digest[..len]);
//! ```

pub use mars_util_host_command_types as types;
pub use mars_util_host_command_types::{
    Capabilities, MarsCommandCode, Output, Param, PropertyTag, ResultCode,
};
pub use mars_util_host_commands::api::*;
pub use mars_util_host_session::{
    CacheState, MarsSession, ResultCodePolicy, SessionConfig, SessionGuard, SessionStatistics,
};
pub use mars_util_host_transport::{Loopback, Transport, TransportConfig, UdpTransport};

// Re-export error types
pub use mars_util_host_command_types::CommandError;
pub use mars_util_host_session::{LockError, SessionError};
pub use mars_util_host_transport::TransportError;
