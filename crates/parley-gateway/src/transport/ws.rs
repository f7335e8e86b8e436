//! WebSocket handler.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS and allocate a connection id
//! - Register the connection's outbound queue with the realtime core
//! - Lifecycle: ping/pong + idle timeout
//! - Policy before decode, then hand events to the dispatcher
//! - Dispatch `Disconnect` exactly once when the loop ends, whatever the cause

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tracing::Instrument;

use crate::app_state::AppState;
use crate::dispatch::InboundEvent;
use crate::policy::{ConnPolicy, PolicyDecision};
use crate::realtime::{Connection, ConnectionId};
use crate::transport::codec::{decode, frame_len, Inbound};

// --------------------
// Entry
// --------------------
pub async fn ws_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    app.metrics().ws_upgrades.inc(&[]);
    ws.on_upgrade(move |socket| {
        let id = ConnectionId::next();
        run_session(app, id, socket).instrument(tracing::info_span!("conn", %id))
    })
}

// --------------------
// Core session loop
// --------------------
async fn run_session(app: AppState, id: ConnectionId, socket: WebSocket) {
    let gw = &app.cfg().gateway;
    let dispatcher = app.dispatcher();

    // ---- outbound channel, owned by the registry from here on
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(gw.outbound_queue);
    dispatcher.core().connect(id, Connection::new(out_tx.clone()));
    tracing::info!("connected");

    let (mut ws_tx, mut ws_rx) = socket.split();

    // ---- timers
    let ping_every = Duration::from_millis(gw.ping_interval_ms);
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval_at(Instant::now() + ping_every, ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut policy = ConnPolicy::from_config(gw);
    let mut last_activity = Instant::now();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else { break; };
                if ws_tx.send(m).await.is_err() {
                    break;
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(Ok(msg)) = incoming else { break; };
                last_activity = Instant::now();

                // cheap-first: size and rate before any parsing
                let bytes_len = frame_len(&msg);
                let decision = match &msg {
                    Message::Text(_) => policy.check_event(bytes_len),
                    _ => policy.check_len(bytes_len),
                };
                match decision {
                    PolicyDecision::Pass => {}
                    PolicyDecision::Drop => {
                        app.metrics().policy_drops.inc(&[("reason", "rate_limited")]);
                        continue;
                    }
                    PolicyDecision::Close { reason } => {
                        app.metrics().policy_drops.inc(&[("reason", reason)]);
                        tracing::debug!(bytes_len, reason, "closing connection");
                        break;
                    }
                }

                match decode(msg) {
                    Ok(Inbound::Event { ev, .. }) => dispatcher.dispatch(id, ev.into()),
                    // straight to the socket: control replies skip the lossy queue
                    Ok(Inbound::Ping(payload)) => {
                        if ws_tx.send(Message::Pong(payload)).await.is_err() {
                            break;
                        }
                    }
                    Ok(Inbound::Pong) => {}
                    Ok(Inbound::Binary { bytes_len }) => {
                        tracing::debug!(bytes_len, "binary frame ignored");
                    }
                    Ok(Inbound::Close) => break,
                    Err(e) => {
                        app.metrics().decode_errors.inc(&[("kind", e.kind())]);
                        tracing::debug!(error = %e, "undecodable frame ignored");
                    }
                }
            }

            // ping
            _ = ping_tick.tick() => {
                let _ = out_tx.try_send(Message::Ping(Vec::new()));
            }

            // idle timeout
            _ = tokio::time::sleep_until(last_activity + idle_timeout) => {
                tracing::debug!("idle timeout");
                break;
            }
        }
    }

    dispatcher.dispatch(id, InboundEvent::Disconnect);
    let _ = ws_tx.close().await;
    tracing::info!("disconnected");
}
