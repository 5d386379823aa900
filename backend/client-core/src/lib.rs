pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gateway;
pub mod message_log;
pub mod notify;
pub mod projection;
pub mod roster;
pub mod state;
pub mod transport;

#[cfg(test)]
mod tests;

pub const BACKEND_HOSTNAME: &str = "127.0.0.1";
pub const BACKEND_PORT: u16 = 3341;
pub const DEFAULT_BACKEND_URL: &str =
    const_format::concatcp!("ws://", BACKEND_HOSTNAME, ":", BACKEND_PORT);
