// Test doubles for the backend seams.

use crate::dispatcher::{EventSource, EventStream};
use crate::error::BackendError;
use crate::gateway::NodeBackend;
use crate::notify::{Notification, Notifier};

use common::{Channel, ErrorLocation, NodeInfo, SendMessageArgs};

use std::collections::{HashMap, VecDeque};
use std::panic::Location;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

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

pub fn rejected(message: &str) -> BackendError {
    BackendError::Rejected {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Backend whose replies are scripted up front.
#[derive(Default)]
pub struct FakeBackend {
    init_replies: Mutex<VecDeque<Result<NodeInfo, String>>>,
    send_error: Mutex<Option<String>>,
    send_gate: Mutex<Option<oneshot::Receiver<()>>>,
    sent: Mutex<Vec<SendMessageArgs>>,
    init_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_init_replies(replies: Vec<Result<NodeInfo, String>>) -> Self {
        Self {
            init_replies: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn reject_sends(&self, message: &str) {
        *self.send_error.lock().unwrap() = Some(message.to_string());
    }

    /// Hold the next send until the returned sender fires.
    pub fn gate_next_send(&self) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        *self.send_gate.lock().unwrap() = Some(gate);
        release
    }

    pub fn sent(&self) -> Vec<SendMessageArgs> {
        self.sent.lock().unwrap().clone()
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }
}

impl NodeBackend for FakeBackend {
    async fn initialize_client(&self) -> Result<NodeInfo, BackendError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.init_replies.lock().unwrap().pop_front();
        match reply {
            Some(Ok(info)) => Ok(info),
            Some(Err(message)) => Err(rejected(&message)),
            None => Err(rejected("no scripted reply")),
        }
    }

    async fn send_message(&self, args: SendMessageArgs) -> Result<(), BackendError> {
        self.sent.lock().unwrap().push(args);

        let gate = self.send_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        let failure = self.send_error.lock().unwrap().clone();
        match failure {
            Some(message) => Err(rejected(&message)),
            None => Ok(()),
        }
    }
}

/// Event source with hand-fed channels.
#[derive(Default)]
pub struct FakeSource {
    channels: Mutex<HashMap<Channel, Result<EventStream, String>>>,
}

impl FakeSource {
    /// Make `channel` available and return the feeding end.
    pub fn open(&self, channel: Channel) -> mpsc::Sender<Value> {
        let (sender, stream) = mpsc::channel(16);
        self.channels.lock().unwrap().insert(channel, Ok(stream));
        sender
    }

    pub fn refuse(&self, channel: Channel, message: &str) {
        self.channels
            .lock()
            .unwrap()
            .insert(channel, Err(message.to_string()));
    }
}

impl EventSource for FakeSource {
    async fn listen(&self, channel: Channel) -> Result<EventStream, BackendError> {
        let entry = self.channels.lock().unwrap().remove(&channel);
        match entry {
            Some(Ok(stream)) => Ok(stream),
            Some(Err(message)) => Err(rejected(&message)),
            None => Err(rejected("channel unavailable")),
        }
    }
}
