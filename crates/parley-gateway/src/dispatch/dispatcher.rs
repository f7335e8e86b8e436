use std::sync::Arc;

use parley_core::error::Result;
use parley_core::protocol::event::{ClientEvent, MessageRead, SendMessage};

use crate::obs::GatewayMetrics;
use crate::realtime::{ConnectionId, RealtimeCore};
use crate::services::{MessageRouter, ReadReceiptRelay};

/// Everything that can happen on a connection after it opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    SetUsername { name: String },
    SendMessage(SendMessage),
    MessageRead(MessageRead),
    /// Transport closed (close frame, error, idle timeout or policy close).
    Disconnect,
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::SetUsername { .. } => "set-username",
            InboundEvent::SendMessage(_) => "send-message",
            InboundEvent::MessageRead(_) => "message-read",
            InboundEvent::Disconnect => "disconnect",
        }
    }
}

impl From<ClientEvent> for InboundEvent {
    fn from(ev: ClientEvent) -> Self {
        match ev {
            ClientEvent::SetUsername { name } => InboundEvent::SetUsername { name },
            ClientEvent::SendMessage(m) => InboundEvent::SendMessage(m),
            ClientEvent::MessageRead(r) => InboundEvent::MessageRead(r),
        }
    }
}

/// Single entry point from the transport into the realtime core and services.
pub struct Dispatcher {
    core: Arc<RealtimeCore>,
    router: MessageRouter,
    receipts: ReadReceiptRelay,
    metrics: Arc<GatewayMetrics>,
}

impl Dispatcher {
    pub fn new(core: Arc<RealtimeCore>, metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            router: MessageRouter::new(Arc::clone(&core), Arc::clone(&metrics)),
            receipts: ReadReceiptRelay::new(Arc::clone(&core), Arc::clone(&metrics)),
            core,
            metrics,
        }
    }

    pub fn core(&self) -> &Arc<RealtimeCore> {
        &self.core
    }

    /// Handle one event. Failures are logged and never reach the client.
    pub fn dispatch(&self, conn: ConnectionId, ev: InboundEvent) {
        let event = ev.name();
        self.metrics.inbound_events.inc(&[("event", event)]);

        if let Err(e) = self.apply(conn, ev) {
            if e.is_silent() {
                tracing::debug!(%conn, event, error = %e, "event dropped");
            } else {
                tracing::warn!(%conn, event, error = %e, "event failed");
            }
        }
    }

    fn apply(&self, conn: ConnectionId, ev: InboundEvent) -> Result<()> {
        match ev {
            InboundEvent::SetUsername { name } => {
                tracing::info!(%conn, %name, "username set");
                self.core.register(conn, name)
            }
            InboundEvent::SendMessage(msg) => self.router.route(conn, msg).map(drop),
            InboundEvent::MessageRead(read) => {
                self.receipts.acknowledge_read(conn, &read.from).map(drop)
            }
            InboundEvent::Disconnect => {
                if let Some(removed) = self.core.remove(conn)? {
                    tracing::info!(%conn, name = removed.name.as_deref().unwrap_or(""), "connection removed");
                }
                Ok(())
            }
        }
    }
}
