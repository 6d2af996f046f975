//! Sliding-window rate limiter.
//!
//! The limiter keeps the instants of the last `limit` calls. When the
//! history is full, the next call is delayed until `every` has passed since
//! the oldest of them. Only that oldest entry is consulted, so a burst of
//! `limit` calls is followed by a pause rather than a steady drip.

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::error::{Result, TapError};

/// Limits calls to at most `limit` per trailing `every` window by sleeping.
///
/// Not synchronized; see [`SharedRateLimiter`](super::SharedRateLimiter) for
/// use across threads.
#[derive(Debug)]
pub struct RateLimiter {
    /// Maximum calls per window
    limit: usize,
    /// Window length
    every: Duration,
    /// Call instants, most recent first. Never longer than `limit`.
    times: VecDeque<Instant>,
}

impl RateLimiter {
    /// Create a limiter allowing `limit` calls per `every`.
    pub fn new(limit: usize, every: Duration) -> Result<Self> {
        if limit == 0 {
            return Err(TapError::RateLimit(
                "limit must be greater than zero".to_string(),
            ));
        }
        if every.is_zero() {
            return Err(TapError::RateLimit(
                "window must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            limit,
            every,
            times: VecDeque::with_capacity(limit),
        })
    }

    /// Create a limiter with the window given in (possibly fractional) seconds.
    pub fn per_seconds(limit: usize, every: f64) -> Result<Self> {
        if !every.is_finite() || every <= 0.0 {
            return Err(TapError::RateLimit(format!(
                "window must be a positive number of seconds, got {}",
                every
            )));
        }
        Self::new(limit, Duration::from_secs_f64(every))
    }

    /// Maximum calls per window.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Window length.
    pub fn every(&self) -> Duration {
        self.every
    }

    /// Number of calls currently remembered.
    pub fn history_len(&self) -> usize {
        self.times.len()
    }

    /// Evict the oldest call if the history is full and return how long a
    /// call made at `now` has to wait.
    ///
    /// The oldest entry is removed whether or not a wait is needed.
    pub fn delay_at(&mut self, now: Instant) -> Option<Duration> {
        if self.times.len() < self.limit {
            return None;
        }

        let oldest = self.times.pop_back()?;
        let elapsed = now.saturating_duration_since(oldest);
        self.every
            .checked_sub(elapsed)
            .filter(|delay| !delay.is_zero())
    }

    /// Block until another call is allowed, then record it.
    ///
    /// Returns the time spent sleeping.
    pub fn acquire(&mut self) -> Duration {
        let delay = self.delay_at(Instant::now());

        if let Some(delay) = delay {
            debug!(
                delay_ms = delay.as_millis() as u64,
                limit = self.limit,
                every_ms = self.every.as_millis() as u64,
                "Rate limit reached, sleeping"
            );
            std::thread::sleep(delay);
        }

        self.times.push_front(Instant::now());
        trace!(history = self.times.len(), "Recorded rate limited call");

        delay.unwrap_or(Duration::ZERO)
    }

    /// Run `f` once a call is allowed.
    pub fn call<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.acquire();
        f()
    }

    /// Wrap `f` so every invocation goes through this limiter.
    pub fn wrap<F>(self, f: F) -> RateLimited<F> {
        RateLimited {
            limiter: self,
            inner: f,
        }
    }
}

/// An operation gated by its own [`RateLimiter`].
///
/// Arguments are passed as one value: a tuple for several, `()` for none.
#[derive(Debug)]
pub struct RateLimited<F> {
    limiter: RateLimiter,
    inner: F,
}

impl<F> RateLimited<F> {
    /// Invoke the wrapped operation, sleeping first if the window is full.
    pub fn call<A, R>(&mut self, args: A) -> R
    where
        F: FnMut(A) -> R,
    {
        self.limiter.acquire();
        (self.inner)(args)
    }

    /// The limiter gating this operation.
    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Unwrap the original operation.
    pub fn into_inner(self) -> F {
        self.inner
    }
}

/// Wrap `f` in a closure allowing at most `limit` calls per `every`.
///
/// ```
/// use std::time::Duration;
/// use tap_pendo::ratelimit::ratelimit;
///
/// let mut add = ratelimit(5, Duration::from_secs(1), |(a, b): (u32, u32)| a + b).unwrap();
/// assert_eq!(add((2, 3)), 5);
/// ```
pub fn ratelimit<F, A, R>(limit: usize, every: Duration, f: F) -> Result<impl FnMut(A) -> R>
where
    F: FnMut(A) -> R,
{
    let mut limited = RateLimiter::new(limit, every)?.wrap(f);
    Ok(move |args: A| limited.call(args))
}
