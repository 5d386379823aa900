//! User-visible error channel.
//!
//! Every [`ClientError`] ends up here after it has been logged. How the
//! notification is shown (dialog, alert line, toast) is up to the shell that
//! implements [`Notifier`].

use crate::error::ClientError;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::sync::Arc;

use common::Channel;
use serde::Serialize;

/// What went wrong, from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Initialization,
    Send,
    Subscription(String),
    Backend,
    Payload(String),
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&ClientError> for Notification {
    fn from(error: &ClientError) -> Self {
        let kind = match error {
            ClientError::Initialization { .. } => NotificationKind::Initialization,
            ClientError::Send { .. } => NotificationKind::Send,
            ClientError::Subscription { channel, .. } => {
                NotificationKind::Subscription(channel_name(*channel))
            }
            ClientError::BackendReported { .. } => NotificationKind::Backend,
            ClientError::Payload { channel, .. } => NotificationKind::Payload(channel_name(*channel)),
            ClientError::State { .. } => NotificationKind::Internal,
        };

        Notification::new(kind, error.message())
    }
}

impl Display for Notification {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        match &self.kind {
            NotificationKind::Initialization => {
                write!(formatter, "Initialization failed: {}", self.message)
            }
            NotificationKind::Send => write!(formatter, "Message sending failed: {}", self.message),
            NotificationKind::Subscription(channel) => {
                write!(formatter, "Failed to listen for {channel}: {}", self.message)
            }
            NotificationKind::Backend => write!(formatter, "P2P Error: {}", self.message),
            NotificationKind::Payload(channel) => {
                write!(formatter, "Unreadable {channel} event: {}", self.message)
            }
            NotificationKind::Internal => write!(formatter, "Internal error: {}", self.message),
        }
    }
}

fn channel_name(channel: Channel) -> String {
    channel.as_str().to_string()
}

/// Presents notifications to the user.
///
/// Implementations may block until the user acknowledges the notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Shared notifier handle used by the dispatcher and the gateway.
pub type SharedNotifier = Arc<dyn Notifier>;
