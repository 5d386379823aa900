pub mod backend;
pub mod client;
pub mod config;
pub mod state;
pub mod transport;

pub use backend::BackendError;
pub use client::ClientError;
pub use config::ConfigError;
pub use state::StateError;
pub use transport::TransportError;

