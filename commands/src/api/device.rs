// Licensed under the Apache-2.0 license

//! Device management API functions

use crate::api::{run, MarsResult};
use mars_util_host_command_types::{Output, Param, PropertyTag, CAPABILITY_GET, SELF_TEST};
use mars_util_host_session::MarsSession;

/// Run the device self test
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `full_test`: Run the full test rather than the quick one
///
/// # Returns
///
/// - `Ok(())` if the device passed
/// - `Err(MarsApiError)` on failure
pub fn mars_cmd_self_test(session: &MarsSession, full_test: bool) -> MarsResult<()> {
    run(session, &SELF_TEST, &[Param::Bool(full_test)], Output::None)
}

/// Query one device capability
///
/// # Parameters
///
/// - `session`: Session whose lock is held by the calling thread
/// - `property`: Capability to query
///
/// # Returns
///
/// - `Ok(u16)` with the capability value
/// - `Err(MarsApiError)` on failure
///
/// # Example
///
/// ```ignore
/// let _guard = session.guard()?;
/// let digest_len = mars_cmd_capability_get(&session, PropertyTag::LenDigest)?;
/// ```
pub fn mars_cmd_capability_get(session: &MarsSession, property: PropertyTag) -> MarsResult<u16> {
    let mut value = 0u16;
    run(
        session,
        &CAPABILITY_GET,
        &[Param::Half(property.into())],
        Output::Half(&mut value),
    )?;
    Ok(value)
}
