//! Backend event dispatch.
//!
//! Subscribes to the three backend channels (`message`, `connection`,
//! `error`) and routes each payload:
//!
//! | channel      | payload              | action                            |
//! |--------------|----------------------|-----------------------------------|
//! | `message`    | `{sender, content}`  | append to the message log         |
//! | `connection` | `{peer_id, status}`  | reconcile the roster              |
//! | `error`      | string               | notify the user, no state change  |
//!
//! Each subscribed channel gets its own task. A task handles one event at a
//! time and waits for the state actor to acknowledge the mutation before it
//! reads the next event, so per-channel delivery order is preserved. Nothing
//! is promised about order across channels.
//!
//! Subscriptions are attempted concurrently and independently: one that
//! fails is reported and skipped, never retried, and never blocks the others.

mod source;

pub use source::{EventSource, EventStream};

use crate::error::ClientError;
use crate::message_log::Message;
use crate::notify::{Notification, SharedNotifier};
use crate::projection::DisplayModel;
use crate::state::{StateCommand, SyncState};
use crate::transport::frame::error_text;

use common::{Channel, ConnectionEvent, ErrorLocation, MessageEvent};

use std::panic::Location;

use futures_util::future::join_all;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;

/// Routes backend events into [`SyncState`].
#[derive(Clone)]
pub struct Dispatcher {
    state: SyncState,
    notifier: SharedNotifier,
}

impl Dispatcher {
    pub fn new(state: SyncState, notifier: SharedNotifier) -> Self {
        Self { state, notifier }
    }

    /// Subscribe to every channel and spawn one consumer task per success.
    ///
    /// Never fails as a whole. Per-channel failures have already been logged
    /// and surfaced when this returns; they are also listed on the handle.
    pub async fn start<S: EventSource>(&self, source: &S) -> DispatcherHandle {
        let attempts = join_all(
            Channel::ALL.map(|channel| async move { (channel, source.listen(channel).await) }),
        )
        .await;

        let mut handle = DispatcherHandle::default();

        for (channel, attempt) in attempts {
            match attempt {
                Ok(stream) => {
                    info!("Listening for {channel} events");
                    let dispatcher = self.clone();
                    handle
                        .tasks
                        .push(tokio::spawn(dispatcher.run_channel(channel, stream)));
                    handle.subscribed.push(channel);
                }
                Err(e) => {
                    let failure = ClientError::Subscription {
                        channel,
                        message: e.message().to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    };
                    self.surface(&failure);
                    handle.failures.push(failure);
                }
            }
        }

        handle
    }

    /// Route a single event.
    ///
    /// # Returns
    ///
    /// * `Ok(DisplayModel)` - State was mutated; the new projection
    /// * `Err(ClientError::BackendReported)` - An `error` event, to be surfaced
    /// * `Err(ClientError::Payload)` - The payload did not have the channel's shape
    /// * `Err(ClientError::State)` - The state actor is gone
    pub async fn handle_event(
        &self,
        channel: Channel,
        payload: Value,
    ) -> Result<DisplayModel, ClientError> {
        let command = match channel {
            Channel::Message => {
                let event: MessageEvent = decode(channel, payload)?;
                StateCommand::AppendMessage(Message::from(event))
            }
            Channel::Connection => {
                let event: ConnectionEvent = decode(channel, payload)?;
                StateCommand::ApplyConnection(event)
            }
            Channel::Error => {
                return Err(ClientError::BackendReported {
                    message: error_text(payload),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        self.state
            .update(command)
            .await
            .map_err(|e| ClientError::State {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn run_channel(self, channel: Channel, mut stream: EventStream) {
        debug!("{channel} channel task started");

        while let Some(payload) = stream.recv().await {
            match self.handle_event(channel, payload).await {
                Ok(display) => debug!(
                    "{channel} event applied ({} connection line(s), {} message line(s))",
                    display.connections.lines.len(),
                    display.messages.lines.len()
                ),
                Err(e) => self.surface(&e),
            }
        }

        warn!("{channel} channel closed by backend");
    }

    fn surface(&self, failure: &ClientError) {
        error!("{failure}");
        self.notifier.notify(Notification::from(failure));
    }
}

fn decode<T: DeserializeOwned>(channel: Channel, payload: Value) -> Result<T, ClientError> {
    serde_json::from_value(payload).map_err(|e| ClientError::Payload {
        channel,
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Result of [`Dispatcher::start`].
#[derive(Debug, Default)]
pub struct DispatcherHandle {
    subscribed: Vec<Channel>,
    failures: Vec<ClientError>,
    tasks: Vec<JoinHandle<()>>,
}

impl DispatcherHandle {
    /// Channels with a running consumer task.
    pub fn subscribed(&self) -> &[Channel] {
        &self.subscribed
    }

    /// Subscriptions that could not be established.
    pub fn failures(&self) -> &[ClientError] {
        &self.failures
    }

    /// Wait until every channel stream has ended.
    pub async fn join(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                error!("Channel task ended abnormally: {e}");
            }
        }
    }

    pub fn abort(&self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
