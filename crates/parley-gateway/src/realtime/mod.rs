//! Realtime runtime for the parley gateway.
//!
//! Connection registry, presence broadcaster, last-seen tracker and the
//! egress helpers that push prepared events onto connection queues.

pub mod core;
pub mod types;

pub use self::core::{
    Connection, ConnectionId, ConnectionRegistry, LastSeenTracker, PresenceBroadcaster,
    RealtimeCore, Removed,
};
pub use types::{Delivery, PreparedMsg};
