use crate::error::BackendError;

use common::{NodeInfo, SendMessageArgs};

use std::future::Future;

/// The two commands the backend node accepts.
pub trait NodeBackend: Send + Sync {
    /// `initialize_client()`: create the local node and report its identity.
    fn initialize_client(&self) -> impl Future<Output = Result<NodeInfo, BackendError>> + Send;

    /// `send_message(peerId, content)`.
    fn send_message(
        &self,
        args: SendMessageArgs,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
