//! Connection status as reported by the backend.

use std::fmt::{Display, Formatter, Result as FormatResult};

use serde::{Deserialize, Serialize};

const CONNECTING: &str = "connecting";
const CONNECTED: &str = "connected";
const DISCONNECTED: &str = "disconnected";

/// Status of one remote peer.
///
/// The backend may introduce statuses this client has never heard of. Those
/// are carried as [`ConnectionStatus::Other`] and render exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Other(String),
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ConnectionStatus::Connecting => CONNECTING,
            ConnectionStatus::Connected => CONNECTED,
            ConnectionStatus::Disconnected => DISCONNECTED,
            ConnectionStatus::Other(status) => status,
        }
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, ConnectionStatus::Disconnected)
    }
}

impl From<String> for ConnectionStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            CONNECTING => ConnectionStatus::Connecting,
            CONNECTED => ConnectionStatus::Connected,
            DISCONNECTED => ConnectionStatus::Disconnected,
            _ => ConnectionStatus::Other(status),
        }
    }
}

impl From<&str> for ConnectionStatus {
    fn from(status: &str) -> Self {
        ConnectionStatus::from(status.to_string())
    }
}

impl From<ConnectionStatus> for String {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for ConnectionStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}
