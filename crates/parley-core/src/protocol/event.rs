//! Typed events carried inside an [`Envelope`].
//!
//! Inbound (client → server): `set-username`, `send-message`, `message-read`.
//! Outbound (server → client): `users`, `receive-message`, `last-seen`,
//! `message-read-confirmed`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{ParleyError, Result};
use crate::protocol::envelope::Envelope;

pub const SET_USERNAME: &str = "set-username";
pub const SEND_MESSAGE: &str = "send-message";
pub const MESSAGE_READ: &str = "message-read";

/// `send-message` payload. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMessage {
    pub to: String,
    pub text: String,
    /// Client-assigned display timestamp, relayed as-is when present.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// `message-read` payload: the reader acknowledges everything from `from`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageRead {
    pub from: String,
}

/// Decoded client → server event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    SetUsername { name: String },
    SendMessage(SendMessage),
    MessageRead(MessageRead),
}

impl ClientEvent {
    /// Decode one text frame.
    pub fn decode(s: &str) -> Result<Self> {
        Self::from_envelope(&Envelope::parse(s)?)
    }

    /// Interpret an already-parsed envelope.
    pub fn from_envelope(env: &Envelope) -> Result<Self> {
        match env.event.as_str() {
            SET_USERNAME => Ok(ClientEvent::SetUsername {
                name: payload(env)?,
            }),
            SEND_MESSAGE => Ok(ClientEvent::SendMessage(payload(env)?)),
            MESSAGE_READ => Ok(ClientEvent::MessageRead(payload(env)?)),
            other => Err(ParleyError::BadRequest(format!("unknown event: {other}"))),
        }
    }

    /// Wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::SetUsername { .. } => SET_USERNAME,
            ClientEvent::SendMessage(_) => SEND_MESSAGE,
            ClientEvent::MessageRead(_) => MESSAGE_READ,
        }
    }

    /// Encode as a client would. Used by SDK-style callers and tests.
    pub fn to_json(&self) -> String {
        let data = match self {
            ClientEvent::SetUsername { name } => json!(name),
            ClientEvent::SendMessage(m) => match &m.timestamp {
                Some(ts) => json!({ "to": m.to, "text": m.text, "timestamp": ts }),
                None => json!({ "to": m.to, "text": m.text }),
            },
            ClientEvent::MessageRead(r) => json!({ "from": r.from }),
        };
        json!({ "type": self.name(), "data": data }).to_string()
    }
}

fn payload<T: DeserializeOwned>(env: &Envelope) -> Result<T> {
    serde_json::from_str(env.data_str()?)
        .map_err(|e| ParleyError::BadRequest(format!("{} invalid data: {e}", env.event)))
}

/// Server → client event. Serializes to `{ "type": ..., "data": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Current presence set.
    Users(Vec<String>),
    /// Direct message delivered to its recipient. `from` is empty when the
    /// sender never registered a name.
    ReceiveMessage {
        from: String,
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<String>,
    },
    /// A named user disconnected at `timestamp` (`HH:MM`).
    LastSeen { user: String, timestamp: String },
    /// `to` (the reader) has read the recipient's messages.
    MessageReadConfirmed { to: String },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Users(_) => "users",
            ServerEvent::ReceiveMessage { .. } => "receive-message",
            ServerEvent::LastSeen { .. } => "last-seen",
            ServerEvent::MessageReadConfirmed { .. } => "message-read-confirmed",
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| ParleyError::Internal(format!("json encode failed: {e}")))
    }

    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| ParleyError::BadRequest(format!("invalid server event: {e}")))
    }
}
