use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use parley_core::error::{ParleyError, Result};
use parley_core::protocol::ServerEvent;

use crate::config::LastSeenClock;
use crate::obs::GatewayMetrics;
use crate::realtime::core::{
    Connection, ConnectionId, ConnectionRegistry, LastSeenTracker, PresenceBroadcaster, Removed,
};
use crate::realtime::types::{Delivery, PreparedMsg};

/// RealtimeCore: owns the connection registry and serializes every mutation
/// of it, together with the broadcasts each mutation triggers.
pub struct RealtimeCore {
    registry: Mutex<ConnectionRegistry>,
    presence: PresenceBroadcaster,
    last_seen: LastSeenTracker,
    metrics: Arc<GatewayMetrics>,
}

impl RealtimeCore {
    pub fn new(clock: LastSeenClock, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            registry: Mutex::new(ConnectionRegistry::new()),
            presence: PresenceBroadcaster::new(Arc::clone(&metrics)),
            last_seen: LastSeenTracker::new(clock, Arc::clone(&metrics)),
            metrics,
        }
    }

    // Poison is ignored: no mutation can panic halfway through the maps.
    fn lock(&self) -> MutexGuard<'_, ConnectionRegistry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` against a consistent snapshot of the registry.
    pub fn read<R>(&self, f: impl FnOnce(&ConnectionRegistry) -> R) -> R {
        f(&self.lock())
    }

    pub fn connect(&self, id: ConnectionId, conn: Connection) {
        self.lock().connect(id, conn);
        self.metrics.connections_active.inc(&[]);
    }

    /// Register `name` for `id`, then broadcast presence.
    pub fn register(&self, id: ConnectionId, name: String) -> Result<()> {
        let mut reg = self.lock();
        if !reg.register(id, name) {
            return Err(ParleyError::Internal(format!("register on unknown connection {id}")));
        }
        self.presence.broadcast(&reg)?;
        Ok(())
    }

    /// Remove `id`; if it had a non-empty name, broadcast its last-seen stamp, then
    /// broadcast presence. Returns `None` for an unknown id.
    pub fn remove(&self, id: ConnectionId) -> Result<Option<Removed>> {
        let mut reg = self.lock();
        let Some(removed) = reg.remove(id) else {
            return Ok(None);
        };
        self.metrics.connections_active.dec(&[]);

        // an empty name is treated as no name
        if let Some(name) = removed.name.as_deref().filter(|n| !n.is_empty()) {
            self.last_seen.broadcast(&reg, name)?;
        }
        self.presence.broadcast(&reg)?;
        Ok(Some(removed))
    }

    pub fn resolve(&self, name: &str) -> Option<ConnectionId> {
        self.lock().resolve(name)
    }

    pub fn name_of(&self, id: ConnectionId) -> Option<String> {
        self.lock().name_of(id).map(str::to_string)
    }

    pub fn online_names(&self) -> Vec<String> {
        self.lock().online_names()
    }

    pub fn connection_count(&self) -> usize {
        self.lock().len()
    }

    /// Send one event to one connection, outside the registry lock.
    pub fn send_to(&self, conn: &Connection, ev: &ServerEvent) -> Result<Delivery> {
        let prepared = PreparedMsg::prepare(ev)?;
        Ok(deliver(conn, &prepared, &self.metrics))
    }
}

fn deliver(conn: &Connection, msg: &PreparedMsg, metrics: &GatewayMetrics) -> Delivery {
    let outcome = conn.try_deliver(msg);
    if outcome == Delivery::QueueFull {
        tracing::warn!(event = msg.event(), "outbound queue full, event dropped");
        metrics.egress_drops.inc(&[("event", msg.event())]);
    }
    outcome
}

/// Fan out to every open connection. Returns how many queues accepted it.
pub(crate) fn broadcast_all(
    registry: &ConnectionRegistry,
    ev: &ServerEvent,
    metrics: &GatewayMetrics,
) -> Result<usize> {
    let prepared = PreparedMsg::prepare(ev)?;
    let queued = registry
        .connections()
        .filter(|(_, conn)| deliver(conn, &prepared, metrics) == Delivery::Queued)
        .count();
    metrics.broadcasts.inc(&[("event", prepared.event())]);
    Ok(queued)
}
