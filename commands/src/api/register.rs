// Licensed under the Apache-2.0 license

//! Measurement register API functions

use crate::api::{fixed_input, run, run_sized, MarsResult};
use mars_util_host_command_types::{LengthSource, Output, Param, PCR_EXTEND, REG_READ};
use mars_util_host_session::MarsSession;

/// Extend a platform configuration register with a digest
///
/// Exactly the device digest length is taken from `digest`.
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `index`: Register index
/// - `digest`: Measurement digest, at least the device digest length
pub fn mars_cmd_pcr_extend(session: &MarsSession, index: u16, digest: &[u8]) -> MarsResult<()> {
    let digest = fixed_input(
        session,
        LengthSource::Digest,
        digest,
        "Digest shorter than the device digest length",
    )?;
    run(
        session,
        &PCR_EXTEND,
        &[Param::Half(index), Param::Bytes(digest)],
        Output::None,
    )
}

/// Read a register
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `index`: Register index
/// - `out`: Buffer of at least the device digest length
///
/// # Returns
///
/// - `Ok(usize)` with the number of bytes read, always the digest length
/// - `Err(MarsApiError)` on failure
///
/// # Example
///
/// ```ignore
/// let _guard = session.guard()?;
/// mars_cmd_pcr_extend(&session, 0, &digest)?;
/// let mut pcr = [0u8; 32];
/// mars_cmd_reg_read(&session, 0, &mut pcr)?;
/// ```
pub fn mars_cmd_reg_read(session: &MarsSession, index: u16, out: &mut [u8]) -> MarsResult<usize> {
    run_sized(session, &REG_READ, &[Param::Half(index)], out)
}
