use common::SendMessageArgs;

use std::mem::take;

/// Input fields of the send form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeForm {
    pub peer_id: String,
    pub content: String,
}

impl ComposeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_peer_id(&mut self, peer_id: impl Into<String>) {
        self.peer_id = peer_id.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn is_empty(&self) -> bool {
        self.peer_id.is_empty() && self.content.is_empty()
    }

    /// Move both fields out, leaving the form blank.
    pub fn take(&mut self) -> SendMessageArgs {
        SendMessageArgs {
            peer_id: take(&mut self.peer_id),
            content: take(&mut self.content),
        }
    }
}
