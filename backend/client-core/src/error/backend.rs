use crate::error::transport::TransportError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Outcome of a backend command that did not succeed.
#[derive(Debug, ThisError)]
pub enum BackendError {
    /// The backend answered with an error value.
    #[error("Backend Rejected: {message} {location}")]
    Rejected {
        message: String,
        location: ErrorLocation,
    },

    /// The request never got an answer.
    #[error("Backend Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },
}

impl BackendError {
    /// Backend-supplied text, suitable for showing to the user.
    pub fn message(&self) -> &str {
        match self {
            BackendError::Rejected { message, .. } | BackendError::Transport { message, .. } => {
                message
            }
        }
    }
}

impl From<TransportError> for BackendError {
    #[track_caller]
    fn from(error: TransportError) -> Self {
        BackendError::Transport {
            message: error.message().to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
