//! Outbound event wire shapes.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use parley_core::protocol::ServerEvent;

fn wire(ev: &ServerEvent) -> Value {
    serde_json::from_str(&ev.to_json().unwrap()).unwrap()
}

#[test]
fn users_is_a_plain_list() {
    let ev = ServerEvent::Users(vec!["alice".into(), "bob".into()]);
    assert_eq!(wire(&ev), json!({ "type": "users", "data": ["alice", "bob"] }));
}

#[test]
fn receive_message_omits_missing_timestamp() {
    let ev = ServerEvent::ReceiveMessage {
        from: "alice".into(),
        text: "hi".into(),
        timestamp: None,
    };
    assert_eq!(
        wire(&ev),
        json!({ "type": "receive-message", "data": { "from": "alice", "text": "hi" } })
    );

    let ev = ServerEvent::ReceiveMessage {
        from: String::new(),
        text: "hi".into(),
        timestamp: Some("10:02".into()),
    };
    assert_eq!(
        wire(&ev),
        json!({ "type": "receive-message", "data": { "from": "", "text": "hi", "timestamp": "10:02" } })
    );
}

#[test]
fn last_seen_and_read_confirmation() {
    let ev = ServerEvent::LastSeen {
        user: "bob".into(),
        timestamp: "23:05".into(),
    };
    assert_eq!(
        wire(&ev),
        json!({ "type": "last-seen", "data": { "user": "bob", "timestamp": "23:05" } })
    );
    assert_eq!(ev.name(), "last-seen");

    let ev = ServerEvent::MessageReadConfirmed { to: "bob".into() };
    assert_eq!(
        wire(&ev),
        json!({ "type": "message-read-confirmed", "data": { "to": "bob" } })
    );
}

#[test]
fn from_json_accepts_server_frames() {
    let ev = ServerEvent::from_json(r#"{"type":"users","data":[]}"#).unwrap();
    assert_eq!(ev, ServerEvent::Users(vec![]));
    assert!(ServerEvent::from_json(r#"{"type":"set-username","data":"x"}"#).is_err());
}
