//! Decode-once codec for the transport layer.
//!
//! - Text frames => `ClientEvent` (envelope first, then the typed payload)
//! - Binary frames are not part of the protocol and are surfaced for ignoring
//! - Ping/Pong/Close are surfaced for lifecycle management

use axum::extract::ws::Message;
use parley_core::{error::Result, protocol::ClientEvent};

#[derive(Debug)]
pub enum Inbound {
    Event { ev: ClientEvent, bytes_len: usize },
    Binary { bytes_len: usize },
    Ping(Vec<u8>),
    Pong,
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => {
            let bytes_len = s.len();
            let ev = ClientEvent::decode(&s)?;
            Ok(Inbound::Event { ev, bytes_len })
        }
        Message::Binary(b) => Ok(Inbound::Binary { bytes_len: b.len() }),
        Message::Ping(v) => Ok(Inbound::Ping(v)),
        Message::Pong(_) => Ok(Inbound::Pong),
        Message::Close(_) => Ok(Inbound::Close),
    }
}

/// Frame length without decoding, for the policy check.
pub fn frame_len(msg: &Message) -> usize {
    match msg {
        Message::Text(s) => s.len(),
        Message::Binary(b) => b.len(),
        Message::Ping(v) => v.len(),
        Message::Pong(v) => v.len(),
        Message::Close(_) => 0,
    }
}
