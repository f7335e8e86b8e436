use std::sync::Arc;

use parley_core::error::{ParleyError, Result};
use parley_core::protocol::ServerEvent;

use crate::obs::GatewayMetrics;
use crate::realtime::{ConnectionId, Delivery, RealtimeCore};

/// Tells an original sender that a reader has read their messages.
/// Carries no message ids: one acknowledgement covers the conversation.
pub struct ReadReceiptRelay {
    core: Arc<RealtimeCore>,
    metrics: Arc<GatewayMetrics>,
}

impl ReadReceiptRelay {
    pub fn new(core: Arc<RealtimeCore>, metrics: Arc<GatewayMetrics>) -> Self {
        Self { core, metrics }
    }

    pub fn acknowledge_read(&self, reader: ConnectionId, original_sender: &str) -> Result<Delivery> {
        let (reader_name, target) = self.core.read(|reg| {
            (
                reg.name_of(reader).map(str::to_string),
                reg.connection_for(original_sender).cloned(),
            )
        });

        let Some(target) = target else {
            self.metrics.read_receipts.inc(&[("outcome", "recipient_offline")]);
            return Err(ParleyError::RecipientOffline(original_sender.to_string()));
        };

        let ev = ServerEvent::MessageReadConfirmed {
            to: reader_name.unwrap_or_default(),
        };
        let delivery = self.core.send_to(&target, &ev)?;
        self.metrics.read_receipts.inc(&[("outcome", delivery.outcome())]);
        Ok(delivery)
    }
}
