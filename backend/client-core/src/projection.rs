//! Pure mapping from synchronized state to what the user sees.

use crate::message_log::MessageLog;
use crate::roster::Roster;

use common::NodeInfo;

use serde::Serialize;

/// One block of the screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub visible: bool,
    pub lines: Vec<String>,
}

impl Panel {
    fn hidden() -> Self {
        Self::default()
    }

    fn shown(lines: Vec<String>) -> Self {
        Self {
            visible: true,
            lines,
        }
    }
}

/// Everything a renderer needs, with no references back into state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub node_identity: Panel,
    pub connections: Panel,
    pub messages: Panel,
}

/// Build the display for the current state.
pub fn project(node: Option<&NodeInfo>, roster: &Roster, log: &MessageLog) -> DisplayModel {
    let node_identity = match node {
        Some(info) => {
            let mut lines = vec![info.node_id.clone()];
            if let Some(ref key) = info.public_key {
                lines.push(key.clone());
            }
            Panel::shown(lines)
        }
        None => Panel::hidden(),
    };

    let connections = if roster.is_empty() {
        Panel::hidden()
    } else {
        Panel::shown(
            roster
                .iter()
                .map(|connection| format!("{} - {}", connection.peer_id, connection.status))
                .collect(),
        )
    };

    let messages = if log.is_empty() {
        Panel::hidden()
    } else {
        Panel::shown(
            log.messages()
                .iter()
                .map(|message| format!("{}: {}", message.sender, message.content))
                .collect(),
        )
    };

    DisplayModel {
        node_identity,
        connections,
        messages,
    }
}
