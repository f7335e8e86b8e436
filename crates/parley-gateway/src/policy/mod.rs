//! Inbound policy (frame size limit, per-connection rate limiting).
//!
//! Applied to raw frames before decoding so oversized or flooding traffic
//! costs as little as possible.

pub mod engine;

pub use engine::{ConnPolicy, PolicyDecision};
