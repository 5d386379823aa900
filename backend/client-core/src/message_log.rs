//! Received messages, in arrival order.

use common::MessageEvent;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: String,
    pub content: String,
}

impl From<MessageEvent> for Message {
    fn from(event: MessageEvent) -> Self {
        Self {
            sender: event.sender,
            content: event.content,
        }
    }
}

/// Append-only message list.
///
/// Grows for the life of the process: entries are never deduplicated,
/// reordered or expired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
