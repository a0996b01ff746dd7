// Licensed under the Apache-2.0 license

//! OS Abstraction Layer (OSAL) for the MARS host library
//!
//! Wraps the handful of operating system services the session layer needs:
//! blocking mutual exclusion, condition variables and thread identity. Poisoned
//! standard library primitives are reported as [`OsalError::ResourceUnavailable`]
//! instead of panicking.

pub mod error;
pub mod sync;
pub mod thread;

pub use error::{OsalError, OsalResult};
pub use sync::{Condvar, Mutex, MutexGuard, RwLock};
pub use thread::{current_id, ThreadBuilder, ThreadHandle, ThreadId};
