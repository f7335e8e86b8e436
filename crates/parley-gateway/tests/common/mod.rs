//! In-memory clients for driving the dispatcher without a socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use axum::extract::ws::Message;
use tokio::sync::mpsc;

use parley_core::protocol::ServerEvent;
use parley_gateway::app_state::AppState;
use parley_gateway::config::GatewayConfig;
use parley_gateway::dispatch::InboundEvent;
use parley_gateway::realtime::{Connection, ConnectionId};

pub struct TestClient {
    pub id: ConnectionId,
    rx: mpsc::Receiver<Message>,
}

impl TestClient {
    /// Everything queued for this client so far.
    pub fn drain(&mut self) -> Vec<ServerEvent> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                Message::Text(s) => out.push(ServerEvent::from_json(&s).unwrap()),
                other => panic!("unexpected frame: {other:?}"),
            }
        }
        out
    }

    pub fn assert_silent(&mut self) {
        let got = self.drain();
        assert!(got.is_empty(), "{} expected nothing, got {got:?}", self.id);
    }
}

pub fn app() -> AppState {
    AppState::new(GatewayConfig::default())
}

pub fn open(app: &AppState) -> TestClient {
    open_with_capacity(app, 64)
}

pub fn open_with_capacity(app: &AppState, capacity: usize) -> TestClient {
    let (tx, rx) = mpsc::channel(capacity);
    let id = ConnectionId::next();
    app.realtime().connect(id, Connection::new(tx));
    TestClient { id, rx }
}

pub fn set_username(app: &AppState, c: &TestClient, name: &str) {
    app.dispatcher().dispatch(c.id, InboundEvent::SetUsername { name: name.into() });
}

pub fn send(app: &AppState, c: &TestClient, to: &str, text: &str) {
    app.dispatcher().dispatch(
        c.id,
        InboundEvent::SendMessage(parley_core::protocol::event::SendMessage {
            to: to.into(),
            text: text.into(),
            timestamp: None,
        }),
    );
}

pub fn read(app: &AppState, c: &TestClient, from: &str) {
    app.dispatcher().dispatch(
        c.id,
        InboundEvent::MessageRead(parley_core::protocol::event::MessageRead { from: from.into() }),
    );
}

pub fn disconnect(app: &AppState, c: &TestClient) {
    app.dispatcher().dispatch(c.id, InboundEvent::Disconnect);
}

pub fn users(names: &[&str]) -> ServerEvent {
    ServerEvent::Users(names.iter().map(|s| s.to_string()).collect())
}

pub fn is_hh_mm(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 5
        && b[2] == b':'
        && b[..2].iter().chain(&b[3..]).all(u8::is_ascii_digit)
        && s[..2].parse::<u8>().map(|h| h < 24).unwrap_or(false)
        && s[3..].parse::<u8>().map(|m| m < 60).unwrap_or(false)
}
