//! Local view of peer connection statuses.
//!
//! The backend reports connection changes asynchronously and may repeat,
//! reorder or skip them. [`Roster::reconcile`] folds each report into an
//! ordered list that holds at most one entry per peer and keeps peers in the
//! order they were first seen, so the display does not reshuffle on updates.

mod status;

pub use status::ConnectionStatus;

use common::ConnectionEvent;

use log::debug;
use serde::Serialize;

/// One remote peer's known status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub peer_id: String,
    pub status: ConnectionStatus,
}

impl Connection {
    pub fn new(peer_id: impl Into<String>, status: impl Into<ConnectionStatus>) -> Self {
        Self {
            peer_id: peer_id.into(),
            status: status.into(),
        }
    }
}

/// Ordered, duplicate-free set of [`Connection`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    connections: Vec<Connection>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one connection report.
    ///
    /// - `disconnected` removes the peer; removing an unknown peer is a no-op.
    /// - Any other status overwrites a known peer in place or appends a new one.
    ///
    /// Peer ids and statuses are not validated; empty strings are ordinary keys.
    pub fn reconcile(&mut self, event: ConnectionEvent) -> &Roster {
        let ConnectionEvent { peer_id, status } = event;
        let status = ConnectionStatus::from(status);
        let position = self.position(&peer_id);

        match (status.is_disconnected(), position) {
            (true, Some(index)) => {
                self.connections.remove(index);
                debug!("Roster: removed {peer_id}");
            }
            (true, None) => {
                debug!("Roster: disconnect for unknown peer {peer_id} ignored");
            }
            (false, Some(index)) => {
                debug!("Roster: {peer_id} -> {status}");
                self.connections[index].status = status;
            }
            (false, None) => {
                debug!("Roster: added {peer_id} ({status})");
                self.connections.push(Connection { peer_id, status });
            }
        }

        self
    }

    pub fn get(&self, peer_id: &str) -> Option<&Connection> {
        self.position(peer_id).map(|index| &self.connections[index])
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    fn position(&self, peer_id: &str) -> Option<usize> {
        self.connections
            .iter()
            .position(|connection| connection.peer_id == peer_id)
    }
}
