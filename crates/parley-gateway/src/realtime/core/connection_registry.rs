use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::Message;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::realtime::types::{Delivery, PreparedMsg};

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque per-connection identifier, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// One connection's outbound queue sender.
#[derive(Debug, Clone)]
pub struct Connection {
    tx: mpsc::Sender<Message>,
}

impl Connection {
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self { tx }
    }

    /// Lossy enqueue: never waits for the writer.
    pub fn try_deliver(&self, msg: &PreparedMsg) -> Delivery {
        match self.tx.try_send(msg.to_ws_message()) {
            Ok(()) => Delivery::Queued,
            Err(TrySendError::Full(_)) => Delivery::QueueFull,
            Err(TrySendError::Closed(_)) => Delivery::Closed,
        }
    }
}

#[derive(Debug)]
struct ConnEntry {
    conn: Connection,
    name: Option<String>,
    registered_seq: u64,
}

/// What `remove` took out of the registry.
#[derive(Debug)]
pub struct Removed {
    pub conn: Connection,
    /// Name the connection last registered, if any.
    pub name: Option<String>,
}

/// Connection registry:
/// - `connection_id -> (Connection, name?)` for every open connection
/// - `name -> connection_id` for routing, last write wins
///
/// Not synchronized on its own; `RealtimeCore` owns it behind one mutex.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    conns: HashMap<ConnectionId, ConnEntry>,
    names: HashMap<String, ConnectionId>,
    seq: u64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a freshly opened, still unnamed connection.
    pub fn connect(&mut self, id: ConnectionId, conn: Connection) {
        self.conns.insert(
            id,
            ConnEntry {
                conn,
                name: None,
                registered_seq: 0,
            },
        );
    }

    /// Associate `name` with `id`. Any other holder of `name` is silently
    /// superseded. A previous name of `id` stays routable to it until the
    /// name is reused or `id` is removed.
    ///
    /// Returns `false` if `id` is not an open connection.
    pub fn register(&mut self, id: ConnectionId, name: String) -> bool {
        let Some(entry) = self.conns.get_mut(&id) else {
            return false;
        };
        self.seq += 1;
        entry.registered_seq = self.seq;
        entry.name = Some(name.clone());
        self.names.insert(name, id);
        true
    }

    /// Exact, case-sensitive lookup.
    pub fn resolve(&self, name: &str) -> Option<ConnectionId> {
        self.names.get(name).copied()
    }

    pub fn name_of(&self, id: ConnectionId) -> Option<&str> {
        self.conns.get(&id).and_then(|e| e.name.as_deref())
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.conns.get(&id).map(|e| &e.conn)
    }

    /// Resolve a name straight to its live connection.
    pub fn connection_for(&self, name: &str) -> Option<&Connection> {
        self.resolve(name).and_then(|id| self.connection(id))
    }

    /// Drop `id`. Name entries are deleted only where they still point at
    /// `id`; a name taken over by a newer connection is left alone.
    pub fn remove(&mut self, id: ConnectionId) -> Option<Removed> {
        let entry = self.conns.remove(&id)?;
        self.names.retain(|_, holder| *holder != id);
        Some(Removed {
            conn: entry.conn,
            name: entry.name,
        })
    }

    /// Presence set: each registered name once, in order of the owning
    /// connection's latest registration.
    pub fn online_names(&self) -> Vec<String> {
        let mut named: Vec<(u64, &str)> = self
            .conns
            .values()
            .filter_map(|e| e.name.as_deref().map(|n| (e.registered_seq, n)))
            .collect();
        named.sort_unstable_by_key(|(seq, _)| *seq);

        let mut seen = HashSet::with_capacity(named.len());
        named
            .into_iter()
            .filter(|(_, n)| seen.insert(*n))
            .map(|(_, n)| n.to_string())
            .collect()
    }

    /// Every open connection, named or not.
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> + '_ {
        self.conns.iter().map(|(id, e)| (*id, &e.conn))
    }

    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }
}
