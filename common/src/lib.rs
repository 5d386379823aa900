//! Shared types for the P2P chat client.
//!
//! This crate holds the pieces both sides of the backend boundary agree on:
//! the command and event names, their payload shapes, and the
//! [`ErrorLocation`] every error in the workspace carries.
//!
//! ## Architecture
//!
//! - **common** (this crate): Wire contract and error plumbing
//! - **client-core**: State synchronization, dispatch and commands
//! - **p2p-chat**: Console shell wiring everything together

pub mod contract;
pub mod error;

pub use contract::{Channel, ConnectionEvent, MessageEvent, NodeInfo, SendMessageArgs};
pub use error::error_location::ErrorLocation;

#[cfg(test)]
mod tests;
