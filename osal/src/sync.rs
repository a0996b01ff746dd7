// Licensed under the Apache-2.0 license

//! Synchronization primitives abstraction

use crate::error::{OsalError, OsalResult};
use std::sync as std_sync;

pub type MutexGuard<'a, T> = std_sync::MutexGuard<'a, T>;

/// Mutex abstraction
#[derive(Debug, Default)]
pub struct Mutex<T> {
    inner: std_sync::Mutex<T>,
}

impl<T> Mutex<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: std_sync::Mutex::new(value),
        }
    }

    pub fn lock(&self) -> OsalResult<MutexGuard<'_, T>> {
        self.inner
            .lock()
            .map_err(|_| OsalError::ResourceUnavailable)
    }
}

/// RwLock abstraction
#[derive(Debug, Default)]
pub struct RwLock<T> {
    inner: std_sync::RwLock<T>,
}

impl<T> RwLock<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: std_sync::RwLock::new(value),
        }
    }

    pub fn read(&self) -> OsalResult<std_sync::RwLockReadGuard<'_, T>> {
        self.inner
            .read()
            .map_err(|_| OsalError::ResourceUnavailable)
    }

    pub fn write(&self) -> OsalResult<std_sync::RwLockWriteGuard<'_, T>> {
        self.inner
            .write()
            .map_err(|_| OsalError::ResourceUnavailable)
    }
}

/// Condition variable abstraction
#[derive(Debug, Default)]
pub struct Condvar {
    inner: std_sync::Condvar,
}

impl Condvar {
    pub fn new() -> Self {
        Self {
            inner: std_sync::Condvar::new(),
        }
    }

    /// Block until notified. Spurious wakeups are possible; callers re-check
    /// their predicate in a loop.
    pub fn wait<'a, T>(&self, guard: MutexGuard<'a, T>) -> OsalResult<MutexGuard<'a, T>> {
        self.inner
            .wait(guard)
            .map_err(|_| OsalError::ResourceUnavailable)
    }

    pub fn notify_one(&self) {
        self.inner.notify_one();
    }
}
