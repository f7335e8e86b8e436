//! Wire protocol: one JSON envelope per WebSocket text frame.
//!
//! - `envelope`: the `{ "type", "data" }` frame with a lazily parsed payload.
//! - `event`: typed client→server and server→client events.
//!
//! Parsing never panics; malformed input is reported as `ParleyError`.

pub mod envelope;
pub mod event;

pub use envelope::Envelope;
pub use event::{ClientEvent, ServerEvent};
