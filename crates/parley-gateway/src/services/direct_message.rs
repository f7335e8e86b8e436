use std::sync::Arc;

use parley_core::error::{ParleyError, Result};
use parley_core::protocol::event::SendMessage;
use parley_core::protocol::ServerEvent;

use crate::obs::GatewayMetrics;
use crate::realtime::{ConnectionId, Delivery, RealtimeCore};

/// Routes a direct message to the connection currently holding the
/// recipient's name. Fire-and-forget: no queueing for offline users.
pub struct MessageRouter {
    core: Arc<RealtimeCore>,
    metrics: Arc<GatewayMetrics>,
}

impl MessageRouter {
    pub fn new(core: Arc<RealtimeCore>, metrics: Arc<GatewayMetrics>) -> Self {
        Self { core, metrics }
    }

    /// `Err(RecipientOffline)` means the message was dropped; the sender is
    /// never told.
    pub fn route(&self, sender: ConnectionId, msg: SendMessage) -> Result<Delivery> {
        let (from, target) = self.core.read(|reg| {
            (
                reg.name_of(sender).map(str::to_string),
                reg.connection_for(&msg.to).cloned(),
            )
        });

        let Some(target) = target else {
            self.metrics.messages_routed.inc(&[("outcome", "recipient_offline")]);
            return Err(ParleyError::RecipientOffline(msg.to));
        };

        let from = from.unwrap_or_else(|| {
            tracing::debug!(%sender, to = %msg.to, "sender has no name yet, relaying with empty from");
            String::new()
        });

        let ev = ServerEvent::ReceiveMessage {
            from,
            text: msg.text,
            timestamp: msg.timestamp,
        };
        let delivery = self.core.send_to(&target, &ev)?;
        self.metrics.messages_routed.inc(&[("outcome", delivery.outcome())]);
        Ok(delivery)
    }
}
