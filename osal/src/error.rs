// Licensed under the Apache-2.0 license

//! Error types for OSAL

use thiserror::Error;

pub type OsalResult<T> = Result<T, OsalError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OsalError {
    /// A primitive was poisoned by a panicking holder
    #[error("Resource unavailable")]
    ResourceUnavailable,
    /// Thread could not be created or joined
    #[error("Thread error: {0}")]
    Thread(&'static str),
}
