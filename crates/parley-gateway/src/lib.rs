//! parley gateway library entry.
//!
//! Presence and direct-message relay over WebSockets: the transport decodes
//! client events, the dispatcher applies them to the connection registry and
//! the point-to-point services, and the realtime core fans results back out.
//! Consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod realtime;
pub mod router;
pub mod services;
pub mod transport;
