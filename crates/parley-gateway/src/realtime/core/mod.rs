//! Realtime core components for the gateway runtime.
//!
//! The connection registry is the single source of truth for who is online.
//! `RealtimeCore` owns it behind one lock; presence and last-seen
//! broadcasts run against the locked registry so every connection sees them
//! in mutation order.

mod connection_registry;
mod last_seen;
mod presence;
mod realtime;

pub use connection_registry::{Connection, ConnectionId, ConnectionRegistry, Removed};
pub use last_seen::LastSeenTracker;
pub use presence::PresenceBroadcaster;
pub use realtime::RealtimeCore;
