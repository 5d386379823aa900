//! Routing of inbound frames to waiting requests and channel subscribers.

use crate::error::TransportError;
use crate::transport::frame::{ServerFrame, error_text};

use common::{Channel, ErrorLocation};

use std::collections::HashMap;
use std::panic::Location;

use log::{debug, info, warn};
use serde_json::Value;
use tokio::sync::{Mutex, mpsc, oneshot};

/// Reply to one request: the `ok` value, or the backend's error message.
pub(crate) type Reply = Result<Value, String>;

#[derive(Default)]
struct Pending {
    closed: bool,
    requests: HashMap<String, oneshot::Sender<Reply>>,
}

#[derive(Default)]
pub(crate) struct Router {
    pending: Mutex<Pending>,
    subscribers: Mutex<HashMap<Channel, mpsc::Sender<Value>>>,
}

impl Router {
    /// Register a request before its frame goes out.
    ///
    /// Fails once the connection has closed, so no caller waits on a reply
    /// that can never arrive.
    pub(crate) async fn register(
        &self,
        id: String,
        reply: oneshot::Sender<Reply>,
    ) -> Result<(), TransportError> {
        let mut pending = self.pending.lock().await;
        if pending.closed {
            return Err(TransportError::Closed {
                message: "Backend connection closed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        pending.requests.insert(id, reply);
        Ok(())
    }

    pub(crate) async fn forget(&self, id: &str) {
        self.pending.lock().await.requests.remove(id);
    }

    pub(crate) async fn subscribe(&self, channel: Channel, sender: mpsc::Sender<Value>) {
        if self
            .subscribers
            .lock()
            .await
            .insert(channel, sender)
            .is_some()
        {
            warn!("Replacing existing {channel} subscriber");
        }
    }

    pub(crate) async fn unsubscribe(&self, channel: Channel) {
        self.subscribers.lock().await.remove(&channel);
    }

    /// Deliver one inbound text frame.
    pub(crate) async fn route(&self, text: &str) {
        let frame: ServerFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Dropping unreadable frame from backend: {e}");
                self.fail_unreadable_reply(text, &e.to_string()).await;
                return;
            }
        };

        match frame {
            ServerFrame::Reply { id, ok, error } => {
                let waiter = self.pending.lock().await.requests.remove(&id);
                let Some(waiter) = waiter else {
                    warn!("Reply for unknown request {id}");
                    return;
                };
                let reply = match error {
                    Some(value) => Err(error_text(value)),
                    None => Ok(ok.unwrap_or(Value::Null)),
                };
                if waiter.send(reply).is_err() {
                    debug!("Requester for {id} went away");
                }
            }
            ServerFrame::Event { event, payload } => {
                let channel = match event.parse::<Channel>() {
                    Ok(channel) => channel,
                    Err(e) => {
                        warn!("{e}, event dropped");
                        return;
                    }
                };

                let sender = self.subscribers.lock().await.get(&channel).cloned();
                let Some(sender) = sender else {
                    warn!("No subscriber for {channel} event, dropped");
                    return;
                };

                if sender.send(payload).await.is_err() {
                    debug!("{channel} subscriber went away");
                    self.unsubscribe(channel).await;
                }
            }
        }
    }

    /// A reply that could not be decoded still releases its requester,
    /// provided its `id` can be recovered.
    async fn fail_unreadable_reply(&self, text: &str, reason: &str) {
        let Ok(raw) = serde_json::from_str::<Value>(text) else {
            return;
        };
        if raw.get("type").and_then(Value::as_str) != Some("reply") {
            return;
        }
        let Some(id) = raw.get("id").and_then(Value::as_str) else {
            return;
        };

        let Some(waiter) = self.pending.lock().await.requests.remove(id) else {
            return;
        };
        if waiter
            .send(Err(format!("Unreadable reply from backend: {reason}")))
            .is_err()
        {
            debug!("Requester for {id} went away");
        }
    }

    /// Fail every waiting request and end every channel stream.
    pub(crate) async fn close(&self) {
        let dropped = {
            let mut pending = self.pending.lock().await;
            pending.closed = true;
            pending.requests.drain().count()
        };
        let channels = {
            let mut subscribers = self.subscribers.lock().await;
            let count = subscribers.len();
            subscribers.clear();
            count
        };
        info!("Backend connection closed ({dropped} pending request(s), {channels} channel(s))");
    }
}
