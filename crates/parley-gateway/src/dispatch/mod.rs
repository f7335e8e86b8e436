//! Dispatcher module exports.
//!
//! Every inbound connection event goes through `Dispatcher::dispatch`, which
//! matches exhaustively on `InboundEvent`.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, InboundEvent};
