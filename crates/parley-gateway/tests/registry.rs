//! Connection registry bookkeeping, no dispatcher involved.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tokio::sync::mpsc;

use parley_gateway::realtime::{Connection, ConnectionId, ConnectionRegistry};

fn conn() -> Connection {
    let (tx, _rx) = mpsc::channel(4);
    Connection::new(tx)
}

fn registry_with(n: usize) -> (ConnectionRegistry, Vec<ConnectionId>) {
    let mut reg = ConnectionRegistry::new();
    let ids: Vec<_> = (0..n).map(|_| ConnectionId::next()).collect();
    for id in &ids {
        reg.connect(*id, conn());
    }
    (reg, ids)
}

#[test]
fn resolve_returns_latest_registrant() {
    let (mut reg, ids) = registry_with(3);
    let calls = [(0, "alice"), (1, "bob"), (2, "alice"), (1, "alice"), (0, "bob")];
    for (i, name) in calls {
        assert!(reg.register(ids[i], name.to_string()));
    }
    assert_eq!(reg.resolve("alice"), Some(ids[1]));
    assert_eq!(reg.resolve("bob"), Some(ids[0]));
    assert_eq!(reg.resolve("Alice"), None);
}

#[test]
fn remove_only_clears_names_it_still_holds() {
    let (mut reg, ids) = registry_with(2);
    reg.register(ids[0], "alice".into());
    reg.register(ids[1], "alice".into());

    let removed = reg.remove(ids[0]).expect("was connected");
    assert_eq!(removed.name.as_deref(), Some("alice"));
    assert_eq!(reg.resolve("alice"), Some(ids[1]));

    reg.remove(ids[1]);
    assert_eq!(reg.resolve("alice"), None);
    assert!(reg.is_empty());
}

#[test]
fn rename_leaves_old_name_routable_until_removed() {
    let (mut reg, ids) = registry_with(1);
    reg.register(ids[0], "alice".into());
    reg.register(ids[0], "carol".into());

    assert_eq!(reg.name_of(ids[0]), Some("carol"));
    assert_eq!(reg.resolve("alice"), Some(ids[0]));
    assert_eq!(reg.online_names(), vec!["carol".to_string()]);

    reg.remove(ids[0]);
    assert_eq!(reg.resolve("alice"), None);
    assert_eq!(reg.resolve("carol"), None);
}

#[test]
fn unknown_connection_cannot_register() {
    let mut reg = ConnectionRegistry::new();
    assert!(!reg.register(ConnectionId::next(), "ghost".into()));
    assert_eq!(reg.resolve("ghost"), None);
    assert!(reg.remove(ConnectionId::next()).is_none());
}

#[test]
fn online_names_are_unique_and_in_registration_order() {
    let (mut reg, ids) = registry_with(4);
    reg.register(ids[2], "carol".into());
    reg.register(ids[0], "alice".into());
    reg.register(ids[1], "carol".into());

    assert_eq!(reg.online_names(), vec!["carol".to_string(), "alice".to_string()]);
    assert_eq!(reg.name_of(ids[3]), None);
    assert_eq!(reg.connections().count(), 4);
    assert_eq!(reg.len(), 4);
}
