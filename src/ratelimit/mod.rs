//! Blocking call-rate limiting for API requests.

mod limiter;
mod shared;

pub use limiter::{ratelimit, RateLimited, RateLimiter};
pub use shared::SharedRateLimiter;
