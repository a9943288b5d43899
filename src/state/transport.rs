//! Transport seam.
//!
//! The coordinator never talks to sockets. It needs a stable identity per
//! connection, named broadcast groups, and emit-to-one / emit-to-group
//! primitives; [`Transport`] is that contract. [`LocalTransport`] is an
//! in-process implementation that records every delivered message per
//! connection with a sequence number.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use super::protocol::ServerMessage;

/// Stable identity of one client connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ConnectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outbound messaging required by the coordinator.
///
/// Delivery is fire-and-forget: implementations drop messages for unknown
/// connections instead of failing.
pub trait Transport: Send + Sync {
    /// Deliver to a single connection.
    fn send(&self, conn: &ConnectionId, message: &ServerMessage);

    /// Deliver to every member of a group.
    fn broadcast(&self, group: &str, message: &ServerMessage);

    fn join_group(&self, conn: &ConnectionId, group: &str);

    fn leave_group(&self, conn: &ConnectionId, group: &str);

    /// Forget a connection and all of its group memberships.
    fn disconnect(&self, conn: &ConnectionId);
}

/// A message delivered to a connection.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub seq: u64,
    pub message: serde_json::Value,
}

/// Per-connection bookkeeping for [`LocalTransport`].
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,

    /// Groups this connection receives broadcasts for
    pub groups: HashSet<String>,

    /// Sequence number of the last delivery
    pub send_seq: u64,

    /// Deliveries not yet taken by the reader
    pub outbox: Vec<Delivery>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            groups: HashSet::new(),
            send_seq: 0,
            outbox: Vec::new(),
        }
    }

    /// Record a delivery, returning its sequence number.
    pub fn deliver(&mut self, message: serde_json::Value) -> u64 {
        self.send_seq += 1;
        self.outbox.push(Delivery {
            seq: self.send_seq,
            message,
        });
        self.send_seq
    }
}

#[derive(Debug, Default)]
struct LocalState {
    connections: HashMap<ConnectionId, Connection>,
    groups: HashMap<String, HashSet<ConnectionId>>,
}

impl LocalState {
    fn deliver(&mut self, conn: &ConnectionId, message: &serde_json::Value) {
        match self.connections.get_mut(conn) {
            Some(c) => {
                c.deliver(message.clone());
            }
            None => tracing::trace!(conn = %conn, "dropping message for unknown connection"),
        }
    }

    fn remove_from_group(&mut self, conn: &ConnectionId, group: &str) {
        if let Some(members) = self.groups.get_mut(group) {
            members.remove(conn);
            if members.is_empty() {
                self.groups.remove(group);
            }
        }
    }
}

/// In-process transport that keeps an outbox per connection.
#[derive(Debug, Default)]
pub struct LocalTransport {
    state: Mutex<LocalState>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a connection. Reconnecting an existing id resets it.
    pub fn connect(&self, conn: impl Into<ConnectionId>) -> ConnectionId {
        let conn = conn.into();
        let mut state = self.state();
        if let Some(old) = state.connections.remove(&conn) {
            for group in &old.groups {
                state.remove_from_group(&conn, group);
            }
        }
        state
            .connections
            .insert(conn.clone(), Connection::new(conn.clone()));
        conn
    }

    pub fn is_connected(&self, conn: &ConnectionId) -> bool {
        self.state().connections.contains_key(conn)
    }

    /// Snapshot of a connection's bookkeeping.
    pub fn connection(&self, conn: &ConnectionId) -> Option<Connection> {
        self.state().connections.get(conn).cloned()
    }

    /// Drain and return everything delivered to a connection so far.
    pub fn take(&self, conn: &ConnectionId) -> Vec<serde_json::Value> {
        self.state()
            .connections
            .get_mut(conn)
            .map(|c| c.outbox.drain(..).map(|d| d.message).collect())
            .unwrap_or_default()
    }

    /// Current members of a group, sorted.
    pub fn group_members(&self, group: &str) -> Vec<ConnectionId> {
        let mut members: Vec<ConnectionId> = self
            .state()
            .groups
            .get(group)
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default();
        members.sort();
        members
    }

    pub fn connected_count(&self) -> usize {
        self.state().connections.len()
    }
}

impl Transport for LocalTransport {
    fn send(&self, conn: &ConnectionId, message: &ServerMessage) {
        let value = message.to_json();
        self.state().deliver(conn, &value);
    }

    fn broadcast(&self, group: &str, message: &ServerMessage) {
        let value = message.to_json();
        let mut state = self.state();
        let members: Vec<ConnectionId> = state
            .groups
            .get(group)
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default();
        for member in &members {
            state.deliver(member, &value);
        }
    }

    fn join_group(&self, conn: &ConnectionId, group: &str) {
        let mut state = self.state();
        let Some(c) = state.connections.get_mut(conn) else {
            tracing::trace!(conn = %conn, group, "unknown connection cannot join group");
            return;
        };
        c.groups.insert(group.to_string());
        state
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(conn.clone());
    }

    fn leave_group(&self, conn: &ConnectionId, group: &str) {
        let mut state = self.state();
        if let Some(c) = state.connections.get_mut(conn) {
            c.groups.remove(group);
        }
        state.remove_from_group(conn, group);
    }

    fn disconnect(&self, conn: &ConnectionId) {
        let mut state = self.state();
        let Some(old) = state.connections.remove(conn) else {
            return;
        };
        for group in &old.groups {
            state.remove_from_group(conn, group);
        }
    }
}
