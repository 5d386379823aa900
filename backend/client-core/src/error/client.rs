use common::{Channel, ErrorLocation};

use thiserror::Error as ThisError;

/// Failures surfaced to the user.
///
/// None of these end the process. Each is logged where it happens and handed
/// to the [`Notifier`](crate::notify::Notifier); nothing is retried.
#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error("Initialization Error: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Send Error: {message} {location}")]
    Send {
        message: String,
        location: ErrorLocation,
    },

    #[error("Subscription Error ({channel}): {message} {location}")]
    Subscription {
        channel: Channel,
        message: String,
        location: ErrorLocation,
    },

    #[error("Backend Error: {message} {location}")]
    BackendReported {
        message: String,
        location: ErrorLocation,
    },

    #[error("Payload Error ({channel}): {message} {location}")]
    Payload {
        channel: Channel,
        message: String,
        location: ErrorLocation,
    },

    #[error("State Error: {message} {location}")]
    State {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// The message without kind prefix or location.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Initialization { message, .. }
            | ClientError::Send { message, .. }
            | ClientError::Subscription { message, .. }
            | ClientError::BackendReported { message, .. }
            | ClientError::Payload { message, .. }
            | ClientError::State { message, .. } => message,
        }
    }
}
