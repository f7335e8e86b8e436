//! parley core: transport-agnostic protocol primitives and error types.
//!
//! This crate defines the wire-level contract between chat clients and the
//! gateway (event envelopes, inbound and outbound event payloads) plus the
//! error surface shared by both sides. It carries no transport or runtime
//! dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed client input surfaces as `ParleyError::BadRequest`, never a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ParleyError, Result};
