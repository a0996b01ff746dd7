// Licensed under the Apache-2.0 license

//! Session Lock
//!
//! An owner-tracking mutex whose hold spans several calls. `lock()` and
//! `unlock()` are separate operations, so the hold is recorded as an owner
//! thread id rather than as a borrowed guard. Re-entry is rejected, not
//! granted.

use mars_util_host_osal::{current_id, Condvar, Mutex, OsalError, ThreadId};
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// `lock()` called by the thread that already owns the lock
    #[error("Lock already held by the calling thread")]
    AlreadyHeld,

    /// `unlock()` called by a thread other than the owner
    #[error("Lock is not owned by the calling thread")]
    NotOwner,

    /// A command was executed without holding the lock
    #[error("Session lock must be held to execute commands")]
    NotHeld,

    #[error("Lock primitive failure: {0}")]
    Osal(#[from] OsalError),
}

pub type LockResult<T> = Result<T, LockError>;

#[derive(Debug, Default)]
pub struct SessionLock {
    owner: Mutex<Option<ThreadId>>,
    released: Condvar,
}

impl SessionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is free, then record the calling thread as owner
    pub fn lock(&self) -> LockResult<()> {
        let me = current_id();
        let mut owner = self.owner.lock()?;

        if *owner == Some(me) {
            log::warn!("Re-entrant lock attempt from {:?}", me);
            return Err(LockError::AlreadyHeld);
        }

        while owner.is_some() {
            owner = self.released.wait(owner)?;
        }

        *owner = Some(me);
        log::debug!("Session lock acquired by {:?}", me);
        Ok(())
    }

    pub fn unlock(&self) -> LockResult<()> {
        let me = current_id();
        let mut owner = self.owner.lock()?;

        if *owner != Some(me) {
            log::warn!("Unlock attempt from non-owner {:?}", me);
            return Err(LockError::NotOwner);
        }

        *owner = None;
        drop(owner);
        self.released.notify_one();
        log::debug!("Session lock released by {:?}", me);
        Ok(())
    }

    pub fn is_held_by_current_thread(&self) -> bool {
        let me = current_id();
        self.owner
            .lock()
            .map(|owner| *owner == Some(me))
            .unwrap_or(false)
    }

    pub fn is_locked(&self) -> bool {
        self.owner
            .lock()
            .map(|owner| owner.is_some())
            .unwrap_or(false)
    }

    /// Acquire the lock for the lifetime of the returned guard
    pub fn guard(&self) -> LockResult<SessionGuard<'_>> {
        self.lock()?;
        Ok(SessionGuard {
            lock: self,
            _not_send: PhantomData,
        })
    }
}

/// Releases the session lock when dropped.
///
/// Bound to the acquiring thread since ownership is tracked per thread.
pub struct SessionGuard<'a> {
    lock: &'a SessionLock,
    _not_send: PhantomData<*const ()>,
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            log::warn!("Session guard release failed: {}", err);
        }
    }
}
