// Licensed under the Apache-2.0 license

//! Key management API functions

use crate::api::{run, run_sized, MarsApiError, MarsResult};
use mars_util_host_command_types::{Output, Param, DERIVE, DP_DERIVE};
use mars_util_host_session::MarsSession;

/// Derive a key identifier from the selected registers and a context
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `reg_select`: Bit mask of registers mixed into the derivation
/// - `context`: Caller derivation context
/// - `out`: Buffer of at least the device key length
///
/// # Returns
///
/// - `Ok(usize)` with the key identifier length
/// - `Err(MarsApiError)` on failure
///
/// # Example
///
/// ```ignore
/// let mut id = [0u8; 32];
/// mars_cmd_derive(&session, 1, b"CompoundDeviceID", &mut id)?;
/// ```
pub fn mars_cmd_derive(
    session: &MarsSession,
    reg_select: u32,
    context: &[u8],
    out: &mut [u8],
) -> MarsResult<usize> {
    run_sized(
        session,
        &DERIVE,
        &[Param::Word(reg_select), Param::Bytes(context)],
        out,
    )
}

/// Replace the device derivation parent with one derived from it
///
/// Keys derived afterwards differ from those derived before.
pub fn mars_cmd_dp_derive(session: &MarsSession, reg_select: u32, context: &[u8]) -> MarsResult<()> {
    run(
        session,
        &DP_DERIVE,
        &[Param::Word(reg_select), Param::Bytes(context)],
        Output::None,
    )
}

/// Read the public half of an asymmetric key.
///
/// Not supported; always returns [`MarsApiError::NotImplemented`] without
/// contacting the device.
pub fn mars_cmd_public_read(
    _session: &MarsSession,
    _restricted: bool,
    _context: &[u8],
    _out: &mut [u8],
) -> MarsResult<usize> {
    log::debug!("PublicRead requested but not implemented");
    Err(MarsApiError::NotImplemented("PublicRead"))
}
