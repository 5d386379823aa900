//! Test helpers for WebSocket integration tests.
//!
//! [`FakeNode`] is a scripted backend node listening on a random local port:
//! - Answers `initialize_client` and `send_message` invokes
//! - Acknowledges or refuses `listen` requests per channel
//! - Pushes events on demand
//! - Records every frame the client sent

use client_core::notify::{Notification, Notifier};
use client_core::transport::{ClientFrame, ServerFrame};
use common::Channel;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

pub const WAIT: Duration = Duration::from_secs(5);

/// How the fake node answers.
#[derive(Clone)]
pub struct Script {
    pub init_reply: Result<Value, String>,
    pub send_error: Option<String>,
    pub refused: HashMap<Channel, String>,
    /// Drop the connection instead of answering any invoke.
    pub hang_up_on_invoke: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            init_reply: Ok(json!({"node_id": "node-abc", "public_key": "pk-123"})),
            send_error: None,
            refused: HashMap::new(),
            hang_up_on_invoke: false,
        }
    }
}

impl Script {
    pub fn refuse(mut self, channel: Channel, message: &str) -> Self {
        self.refused.insert(channel, message.to_string());
        self
    }
}

pub struct FakeNode {
    pub url: String,
    pushes: mpsc::UnboundedSender<ServerFrame>,
    received: Arc<Mutex<Vec<ClientFrame>>>,
}

impl FakeNode {
    /// Bind a random port and serve a single client connection.
    pub async fn start(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake node");
        let url = format!("ws://{}", listener.local_addr().unwrap());
        let (pushes, mut push_rx) = mpsc::unbounded_channel::<ServerFrame>();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("Failed to accept client");
            let ws = accept_async(stream).await.expect("Handshake failed");
            let (mut write, mut read) = ws.split();

            loop {
                tokio::select! {
                    inbound = read.next() => {
                        let Some(Ok(Message::Text(text))) = inbound else {
                            break;
                        };
                        let frame: ClientFrame =
                            serde_json::from_str(text.as_str()).expect("Client sent bad frame");
                        log.lock().unwrap().push(frame.clone());

                        if script.hang_up_on_invoke && matches!(frame, ClientFrame::Invoke { .. }) {
                            break;
                        }

                        let reply = answer(&script, &frame);
                        let text = serde_json::to_string(&reply).unwrap();
                        if write.send(Message::text(text)).await.is_err() {
                            break;
                        }
                    }
                    Some(push) = push_rx.recv() => {
                        let text = serde_json::to_string(&push).unwrap();
                        if write.send(Message::text(text)).await.is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Self {
            url,
            pushes,
            received,
        }
    }

    pub fn push(&self, channel: Channel, payload: Value) {
        self.pushes
            .send(ServerFrame::event(channel, payload))
            .expect("Fake node has stopped");
    }

    pub fn received(&self) -> Vec<ClientFrame> {
        self.received.lock().unwrap().clone()
    }
}

fn answer(script: &Script, frame: &ClientFrame) -> ServerFrame {
    match frame {
        ClientFrame::Invoke { id, cmd, .. } => match cmd.as_str() {
            "initialize_client" => match &script.init_reply {
                Ok(value) => ServerFrame::ok(id.as_str(), value.clone()),
                Err(message) => ServerFrame::error(id.as_str(), message.as_str()),
            },
            "send_message" => match &script.send_error {
                Some(message) => ServerFrame::error(id.as_str(), message.as_str()),
                None => ServerFrame::ok(id.as_str(), Value::Null),
            },
            other => ServerFrame::error(id.as_str(), format!("Unknown command: {other}")),
        },
        ClientFrame::Listen { id, event } => {
            let refusal = event
                .parse::<Channel>()
                .ok()
                .and_then(|channel| script.refused.get(&channel));
            match refusal {
                Some(message) => ServerFrame::error(id.as_str(), message.as_str()),
                None => ServerFrame::ok(id.as_str(), Value::Null),
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// Wait until the published display satisfies `done`.
pub async fn wait_for_display<T, F>(rx: &mut watch::Receiver<T>, done: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    tokio::time::timeout(WAIT, rx.wait_for(done))
        .await
        .expect("Timed out waiting for display update")
        .expect("State was dropped")
        .clone()
}
