//! A rate limiter that can be shared between threads.

use parking_lot::Mutex;
use std::time::Duration;

use super::limiter::RateLimiter;

/// Thread-safe wrapper around [`RateLimiter`].
///
/// The lock is held while sleeping, so callers queue up behind each other
/// and the window holds across all of them.
#[derive(Debug)]
pub struct SharedRateLimiter {
    inner: Mutex<RateLimiter>,
}

impl SharedRateLimiter {
    /// Share an existing limiter.
    pub fn new(limiter: RateLimiter) -> Self {
        Self {
            inner: Mutex::new(limiter),
        }
    }

    /// Block until another call is allowed, then record it.
    pub fn acquire(&self) -> Duration {
        self.inner.lock().acquire()
    }

    /// Run `f` once a call is allowed. The lock is released before `f` runs.
    pub fn call<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.acquire();
        f()
    }

    /// Number of calls currently remembered.
    pub fn history_len(&self) -> usize {
        self.inner.lock().history_len()
    }

    /// Take back the underlying limiter.
    pub fn into_inner(self) -> RateLimiter {
        self.inner.into_inner()
    }
}

impl From<RateLimiter> for SharedRateLimiter {
    fn from(limiter: RateLimiter) -> Self {
        Self::new(limiter)
    }
}
