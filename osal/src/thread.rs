// Licensed under the Apache-2.0 license

//! Thread abstraction

use crate::error::{OsalError, OsalResult};
use std::thread as std_thread;

/// Opaque identity of an OS thread
pub type ThreadId = std_thread::ThreadId;

/// Identity of the calling thread
pub fn current_id() -> ThreadId {
    std_thread::current().id()
}

/// Thread handle
pub struct ThreadHandle<T> {
    inner: std_thread::JoinHandle<T>,
}

impl<T> ThreadHandle<T> {
    pub fn join(self) -> OsalResult<T> {
        self.inner
            .join()
            .map_err(|_| OsalError::Thread("Thread join failed"))
    }
}

/// Thread builder
#[derive(Default)]
pub struct ThreadBuilder {
    name: Option<String>,
}

impl ThreadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn spawn<F, T>(self, f: F) -> OsalResult<ThreadHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let mut builder = std_thread::Builder::new();

        if let Some(name) = self.name {
            builder = builder.name(name);
        }

        let inner = builder
            .spawn(f)
            .map_err(|_| OsalError::Thread("Thread spawn failed"))?;

        Ok(ThreadHandle { inner })
    }
}
