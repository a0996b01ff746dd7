// Licensed under the Apache-2.0 license

//! Attestation and signing API functions

use crate::api::{fixed_input, run, run_sized, MarsResult};
use mars_util_host_command_types::{
    LengthSource, Output, Param, QUOTE, SIGN, SIGNATURE_VERIFY,
};
use mars_util_host_session::MarsSession;

/// Quote the selected registers
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `reg_select`: Bit mask of registers to quote
/// - `nonce`: Freshness value from the verifier
/// - `context`: Attestation key derivation context
/// - `sig`: Buffer of at least the device signature length
///
/// # Returns
///
/// - `Ok(usize)` with the signature length
/// - `Err(MarsApiError)` on failure
///
/// # Example
///
/// ```ignore
/// let _guard = session.guard()?;
/// let mut sig = [0u8; 32];
/// mars_cmd_quote(&session, 1 << 0, &nonce, b"", &mut sig)?;
/// ```
pub fn mars_cmd_quote(
    session: &MarsSession,
    reg_select: u32,
    nonce: &[u8],
    context: &[u8],
    sig: &mut [u8],
) -> MarsResult<usize> {
    run_sized(
        session,
        &QUOTE,
        &[
            Param::Word(reg_select),
            Param::Bytes(nonce),
            Param::Bytes(context),
        ],
        sig,
    )
}

/// Sign a digest with a derived key
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `context`: Signing key derivation context
/// - `digest`: Digest to sign, at least the device digest length
/// - `sig`: Buffer of at least the device signature length
///
/// # Returns
///
/// - `Ok(usize)` with the signature length
/// - `Err(MarsApiError)` on failure
pub fn mars_cmd_sign(
    session: &MarsSession,
    context: &[u8],
    digest: &[u8],
    sig: &mut [u8],
) -> MarsResult<usize> {
    let digest = fixed_input(
        session,
        LengthSource::Digest,
        digest,
        "Digest shorter than the device digest length",
    )?;
    run_sized(
        session,
        &SIGN,
        &[Param::Bytes(context), Param::Bytes(digest)],
        sig,
    )
}

/// Verify a signature over a digest
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `restricted`: Verify with the restricted (attestation) key
/// - `context`: Key derivation context
/// - `digest`: Signed digest, at least the device digest length
/// - `sig`: Signature, at least the device signature length
///
/// # Returns
///
/// - `Ok(true)` if the signature matches
/// - `Ok(false)` if it does not
/// - `Err(MarsApiError)` on failure
pub fn mars_cmd_signature_verify(
    session: &MarsSession,
    restricted: bool,
    context: &[u8],
    digest: &[u8],
    sig: &[u8],
) -> MarsResult<bool> {
    let digest = fixed_input(
        session,
        LengthSource::Digest,
        digest,
        "Digest shorter than the device digest length",
    )?;
    let sig = fixed_input(
        session,
        LengthSource::Signature,
        sig,
        "Signature shorter than the device signature length",
    )?;

    let mut valid = false;
    run(
        session,
        &SIGNATURE_VERIFY,
        &[
            Param::Bool(restricted),
            Param::Bytes(context),
            Param::Bytes(digest),
            Param::Bytes(sig),
        ],
        Output::Bool(&mut valid),
    )?;
    Ok(valid)
}
