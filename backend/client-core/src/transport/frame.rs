use common::Channel;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Frame sent by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Invoke { id: String, cmd: String, args: Value },
    Listen { id: String, event: String },
}

impl ClientFrame {
    pub fn id(&self) -> &str {
        match self {
            ClientFrame::Invoke { id, .. } | ClientFrame::Listen { id, .. } => id,
        }
    }
}

/// Frame sent by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Reply {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ok: Option<Value>,
        /// Usually a string; any other JSON value is accepted as well.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<Value>,
    },
    Event {
        event: String,
        #[serde(default)]
        payload: Value,
    },
}

impl ServerFrame {
    pub fn ok(id: impl Into<String>, value: Value) -> Self {
        ServerFrame::Reply {
            id: id.into(),
            ok: Some(value),
            error: None,
        }
    }

    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        ServerFrame::Reply {
            id: id.into(),
            ok: None,
            error: Some(Value::String(message.into())),
        }
    }

    pub fn event(channel: Channel, payload: Value) -> Self {
        ServerFrame::Event {
            event: channel.as_str().to_string(),
            payload,
        }
    }
}

/// User-facing text of an error value: a string as-is, anything else as JSON.
pub fn error_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
