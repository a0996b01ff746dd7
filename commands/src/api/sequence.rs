// Licensed under the Apache-2.0 license

//! Hash sequence API functions
//!
//! A digest is accumulated on the device across three commands:
//! 1. `mars_cmd_sequence_hash` - start a sequence
//! 2. `mars_cmd_sequence_update` - add data (may be called repeatedly)
//! 3. `mars_cmd_sequence_complete` - finish and read the digest
//!
//! The device keeps one sequence, so the whole run must sit under one
//! session lock hold. `mars_cmd_hash` performs all three steps in one call.

use crate::api::{run, MarsResult};
use mars_util_host_command_types::{
    Output, Param, SEQUENCE_COMPLETE, SEQUENCE_HASH, SEQUENCE_UPDATE,
};
use mars_util_host_session::MarsSession;

/// Start a hash sequence
pub fn mars_cmd_sequence_hash(session: &MarsSession) -> MarsResult<()> {
    run(session, &SEQUENCE_HASH, &[], Output::None)
}

/// Add data to the running hash sequence
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `data`: Data to hash
/// - `out`: Buffer for any bytes the device returns (usually none)
///
/// # Returns
///
/// - `Ok(usize)` with the number of bytes written to `out`
/// - `Err(MarsApiError)` on failure
pub fn mars_cmd_sequence_update(
    session: &MarsSession,
    data: &[u8],
    out: &mut [u8],
) -> MarsResult<usize> {
    let mut len = 0usize;
    run(
        session,
        &SEQUENCE_UPDATE,
        &[Param::Bytes(data)],
        Output::Buffer(out, &mut len),
    )?;
    Ok(len)
}

/// Complete the hash sequence and read the digest
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `out`: Buffer for the digest
///
/// # Returns
///
/// - `Ok(usize)` with the digest length
/// - `Err(MarsApiError)` on failure, including an `out` too small for the digest
pub fn mars_cmd_sequence_complete(session: &MarsSession, out: &mut [u8]) -> MarsResult<usize> {
    let mut len = 0usize;
    run(
        session,
        &SEQUENCE_COMPLETE,
        &[],
        Output::Buffer(out, &mut len),
    )?;
    Ok(len)
}

/// Hash `data` in one start/update/complete run
///
/// # Example
///
/// ```ignore
/// let _guard = session.guard()?;
/// let mut digest = [0u8; 32];
/// let len = mars_cmd_hash(&session, b"this is a test", &mut digest)?;
/// ```
pub fn mars_cmd_hash(session: &MarsSession, data: &[u8], out: &mut [u8]) -> MarsResult<usize> {
    mars_cmd_sequence_hash(session)?;
    mars_cmd_sequence_update(session, data, &mut [])?;
    mars_cmd_sequence_complete(session, out)
}
