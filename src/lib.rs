//! tap-pendo - support utilities for the Pendo extraction tap
//!
//! This crate holds the pieces of the tap that do not talk to the Pendo API
//! directly: a blocking sliding-window rate limiter for outgoing requests,
//! per-entity high-watermark state, bookmark timestamp handling, id list
//! chunking, JSON and schema loading, and command-line/config parsing.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod state;
pub mod utils;
