use axum::extract::ws::Message;

use parley_core::error::Result;
use parley_core::protocol::ServerEvent;

/// Prepared message cached for broadcasting (serialize once, send N times).
#[derive(Debug, Clone)]
pub struct PreparedMsg {
    event: &'static str,
    text: String,
}

impl PreparedMsg {
    pub fn prepare(ev: &ServerEvent) -> Result<Self> {
        Ok(Self {
            event: ev.name(),
            text: ev.to_json()?,
        })
    }

    /// Wire name of the prepared event, used as a metrics label.
    pub fn event(&self) -> &'static str {
        self.event
    }

    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.text.clone())
    }
}

/// Outcome of a non-blocking enqueue onto one connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Queued,
    /// Queue at capacity; the event was dropped for this connection only.
    QueueFull,
    /// Writer already gone (connection is closing).
    Closed,
}

impl Delivery {
    /// Metrics label for a routed event.
    pub fn outcome(self) -> &'static str {
        match self {
            Delivery::Queued => "delivered",
            Delivery::QueueFull => "queue_full",
            Delivery::Closed => "closed",
        }
    }
}
