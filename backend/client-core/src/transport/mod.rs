//! WebSocket bridge to the backend node.
//!
//! The backend is reached over a single WebSocket carrying JSON text frames.
//! Requests are correlated with replies by a random id; events are pushed
//! unsolicited once the client has asked to listen on their channel.
//!
//! # Protocol
//!
//! Client to backend:
//! - `{"type":"invoke","id":..,"cmd":"initialize_client","args":{}}`
//! - `{"type":"invoke","id":..,"cmd":"send_message","args":{"peerId":..,"content":..}}`
//! - `{"type":"listen","id":..,"event":"message"}`
//!
//! Backend to client:
//! - `{"type":"reply","id":..,"ok":<value>}` or `{"type":"reply","id":..,"error":"<message>"}`
//! - `{"type":"event","event":"<channel>","payload":<value>}`

pub mod frame;
pub(crate) mod router;
mod ws;

pub use frame::{ClientFrame, ServerFrame};
pub use ws::WsBackend;
