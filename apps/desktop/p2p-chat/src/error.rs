use client_core::error::{ConfigError, TransportError};
use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors that end the console application.
///
/// Failures of individual user commands are not represented here; those are
/// shown as alerts and the shell keeps running.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatAppError {
    /// Error from this app (logger, terminal I/O)
    #[error("P2P Chat Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core (transport, state)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Config could not be located, loaded or validated
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// A line typed at the prompt could not be understood
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },
}

impl From<ConfigError> for ChatAppError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        ChatAppError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<TransportError> for ChatAppError {
    #[track_caller]
    fn from(error: TransportError) -> Self {
        ChatAppError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
