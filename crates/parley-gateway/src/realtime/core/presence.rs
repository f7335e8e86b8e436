use std::sync::Arc;

use parley_core::error::Result;
use parley_core::protocol::ServerEvent;

use crate::obs::GatewayMetrics;
use crate::realtime::core::connection_registry::ConnectionRegistry;
use crate::realtime::core::realtime::broadcast_all;

/// Publishes the full presence set to every open connection, unnamed ones
/// included. No batching: one broadcast per registry change.
pub struct PresenceBroadcaster {
    metrics: Arc<GatewayMetrics>,
}

impl PresenceBroadcaster {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }

    pub fn snapshot(&self, registry: &ConnectionRegistry) -> ServerEvent {
        ServerEvent::Users(registry.online_names())
    }

    /// Returns how many connections the snapshot was queued on.
    pub fn broadcast(&self, registry: &ConnectionRegistry) -> Result<usize> {
        broadcast_all(registry, &self.snapshot(registry), &self.metrics)
    }
}
