//! Command/event contract with the backend node.
//!
//! Names and field spellings here are what the backend speaks and must not
//! change: the client issues exactly two commands and listens on exactly
//! three event channels.

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Command that asks the backend to create its local node.
pub const INITIALIZE_CLIENT_COMMAND: &str = "initialize_client";

/// Command that asks the backend to deliver a message to a peer.
pub const SEND_MESSAGE_COMMAND: &str = "send_message";

/// Identity of the local node, as returned by `initialize_client`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub node_id: String,

    /// Hex encoded public key. Older backends omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

impl NodeInfo {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            public_key: None,
        }
    }
}

/// Arguments of `send_message`. The backend expects camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageArgs {
    pub peer_id: String,
    pub content: String,
}

/// Payload of the `message` channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEvent {
    pub sender: String,
    pub content: String,
}

/// Payload of the `connection` channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEvent {
    pub peer_id: String,
    pub status: String,
}

/// One of the fixed backend-to-client notification streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Message,
    Connection,
    Error,
}

impl Channel {
    /// Every channel the client subscribes to, in subscription order.
    pub const ALL: [Channel; 3] = [Channel::Message, Channel::Connection, Channel::Error];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Channel::Message => "message",
            Channel::Connection => "connection",
            Channel::Error => "error",
        }
    }
}

impl Display for Channel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "message" => Ok(Channel::Message),
            "connection" => Ok(Channel::Connection),
            "error" => Ok(Channel::Error),
            other => Err(format!("Unknown channel: {other}")),
        }
    }
}
