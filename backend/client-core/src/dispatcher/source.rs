use crate::error::BackendError;

use common::Channel;

use std::future::Future;

use serde_json::Value;
use tokio::sync::mpsc;

/// Raw payloads of one channel, in backend delivery order.
pub type EventStream = mpsc::Receiver<Value>;

/// Something that can push backend events to the client.
pub trait EventSource: Send + Sync {
    /// Start listening on `channel`.
    ///
    /// The returned stream ends when the backend stops delivering events.
    fn listen(
        &self,
        channel: Channel,
    ) -> impl Future<Output = Result<EventStream, BackendError>> + Send;
}
