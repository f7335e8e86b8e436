//! Transport layer (WebSocket).
//!
//! Exposes the WS upgrade handler and the codec that turns frames into
//! client events before they reach the dispatcher.

pub mod codec;
pub mod ws;
