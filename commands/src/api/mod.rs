// Licensed under the Apache-2.0 license

//! High-level API functions for MARS commands
//!
//! Every function here expects the caller to hold the session lock, so a
//! sequence of calls can be grouped under one hold:
//!
//! ```ignore
//! let _guard = session.guard()?;
//! mars_cmd_sequence_hash(&session)?;
//! mars_cmd_sequence_update(&session, b"this is a test", &mut [])?;
//! let len = mars_cmd_sequence_complete(&session, &mut digest)?;
//! ```
//!
//! A nonzero device result code is reported as [`MarsApiError::Device`] and
//! output buffers must then be treated as unwritten.

pub mod attestation;
pub mod device;
pub mod keys;
pub mod register;
pub mod sequence;

pub use attestation::*;
pub use device::*;
pub use keys::*;
pub use register::*;
pub use sequence::*;

use mars_util_host_command_types::{CommandFormat, LengthSource, Output, Param, ResultCode};
use mars_util_host_session::{MarsSession, SessionError};
use thiserror::Error;

/// High-level result type for API functions
pub type MarsResult<T> = Result<T, MarsApiError>;

/// API-specific error types
#[derive(Debug, Error)]
pub enum MarsApiError {
    /// Lock, codec, transport or capability failure below the API
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// The device rejected the command
    #[error("Device returned {0}")]
    Device(ResultCode),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

impl MarsApiError {
    /// Device result code, if the device reported the failure
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            MarsApiError::Device(code) => Some(*code),
            _ => None,
        }
    }
}

/// Execute a table command, mapping a nonzero result code to an error
pub(crate) fn run(
    session: &MarsSession,
    format: &CommandFormat,
    params: &[Param<'_>],
    output: Output<'_>,
) -> MarsResult<()> {
    let code = session.execute(format, params, output)?;
    if code.is_success() {
        Ok(())
    } else {
        Err(MarsApiError::Device(code))
    }
}

/// Execute a command whose returned buffer length is a cached capability.
///
/// Exactly that many bytes are requested; `out` may be longer.
pub(crate) fn run_sized(
    session: &MarsSession,
    format: &CommandFormat,
    params: &[Param<'_>],
    out: &mut [u8],
) -> MarsResult<usize> {
    session.ensure_locked()?;
    let source = format
        .output_len
        .ok_or(MarsApiError::InvalidParameter("Command has no implicit output length"))?;

    let mut len = session.capabilities()?.len_of(source);
    if out.len() < len {
        return Err(MarsApiError::InvalidParameter(
            "Output buffer shorter than the device length",
        ));
    }

    run(session, format, params, Output::MandatoryBuffer(out, &mut len))?;
    Ok(len)
}

/// Truncate a caller value to the cached capability length
pub(crate) fn fixed_input<'a>(
    session: &MarsSession,
    source: LengthSource,
    value: &'a [u8],
    what: &'static str,
) -> MarsResult<&'a [u8]> {
    session.ensure_locked()?;
    let len = session.capabilities()?.len_of(source);
    value.get(..len).ok_or(MarsApiError::InvalidParameter(what))
}
