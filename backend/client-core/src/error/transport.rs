use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum TransportError {
    #[error("Connect Error: {message} {location}")]
    Connect {
        message: String,
        location: ErrorLocation,
    },

    #[error("Send Error: {message} {location}")]
    Send {
        message: String,
        location: ErrorLocation,
    },

    #[error("Closed Error: {message} {location}")]
    Closed {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },
}

impl TransportError {
    pub fn message(&self) -> &str {
        match self {
            TransportError::Connect { message, .. }
            | TransportError::Send { message, .. }
            | TransportError::Closed { message, .. }
            | TransportError::Json { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for TransportError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        TransportError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
