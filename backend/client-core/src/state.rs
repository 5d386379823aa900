//! Synchronized client state using the actor pattern.
//!
//! Holds everything the UI reflects:
//! - Local node identity (once initialized)
//! - Connection roster
//! - Received message log
//!
//! # Architecture
//!
//! - Mutations are sent as [`StateCommand`]s over an mpsc channel
//! - A dedicated task applies them one at a time and recomputes the display
//! - Each mutation completes under a single write guard with no await inside
//! - Reads take `RwLock` snapshots; renderers follow a `watch` channel

use crate::error::state::StateError;
use crate::message_log::{Message, MessageLog};
use crate::projection::{DisplayModel, project};
use crate::roster::Roster;

use common::{ConnectionEvent, ErrorLocation, NodeInfo};

use std::panic::Location;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{Mutex, RwLock, mpsc, oneshot, watch};

const DEFAULT_COMMAND_CAPACITY: usize = 100;

/// Commands that mutate client state.
#[derive(Debug, Clone)]
pub enum StateCommand {
    /// Record the local node identity after a successful initialize.
    SetNode(NodeInfo),

    /// Fold a `connection` event into the roster.
    ApplyConnection(ConnectionEvent),

    /// Append a received message to the log.
    AppendMessage(Message),
}

/// Owned state behind [`SyncState`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientModel {
    pub node: Option<NodeInfo>,
    pub roster: Roster,
    pub messages: MessageLog,
}

impl ClientModel {
    /// Apply one command. Never fails.
    pub fn apply(&mut self, command: StateCommand) {
        match command {
            StateCommand::SetNode(info) => {
                if let Some(ref existing) = self.node {
                    warn!(
                        "Node already initialized as {}, ignoring new identity {}",
                        existing.node_id, info.node_id
                    );
                } else {
                    info!("Node identity set: {}", info.node_id);
                    self.node = Some(info);
                }
            }
            StateCommand::ApplyConnection(event) => {
                let roster = self.roster.reconcile(event);
                debug!("Roster now has {} connection(s)", roster.len());
            }
            StateCommand::AppendMessage(message) => {
                debug!("Message from {} appended", message.sender);
                self.messages.append(message);
            }
        }
    }

    pub fn project(&self) -> DisplayModel {
        project(self.node.as_ref(), &self.roster, &self.messages)
    }
}

struct Envelope {
    command: StateCommand,
    reply: oneshot::Sender<DisplayModel>,
}

/// Shared handle to the client state.
///
/// This type is `Clone`; all clones share the same state and actor.
#[derive(Clone)]
pub struct SyncState {
    /// Channel to send state mutation commands to the actor
    command_tx: Arc<Mutex<Option<mpsc::Sender<Envelope>>>>,

    model: Arc<RwLock<ClientModel>>,

    /// Latest projection, republished after every mutation
    display_tx: Arc<watch::Sender<DisplayModel>>,

    /// Track if actor has been initialized
    actor_init: Arc<Mutex<bool>>,

    command_capacity: usize,
}

impl SyncState {
    /// Create a new state manager.
    ///
    /// The actor will be lazily spawned on first use within an async context.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_COMMAND_CAPACITY)
    }

    pub fn with_capacity(command_capacity: usize) -> Self {
        let (display_tx, _) = watch::channel(DisplayModel::default());
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            model: Arc::new(RwLock::new(ClientModel::default())),
            display_tx: Arc::new(display_tx),
            actor_init: Arc::new(Mutex::new(false)),
            command_capacity: command_capacity.max(1),
        }
    }

    /// Apply a command and wait until the actor has processed it.
    ///
    /// # Returns
    ///
    /// The display model computed right after this command was applied.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Actor`] if the state actor has died.
    pub async fn update(&self, command: StateCommand) -> Result<DisplayModel, StateError> {
        self.ensure_actor().await;

        let tx = self
            .command_tx
            .lock()
            .await
            .clone()
            .ok_or_else(|| StateError::Actor {
                message: "State actor not initialized".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (reply_tx, reply_rx) = oneshot::channel();
        tx.send(Envelope {
            command,
            reply: reply_tx,
        })
        .await
        .map_err(|e| StateError::Actor {
            message: format!("State actor died: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        reply_rx.await.map_err(|e| StateError::Actor {
            message: format!("State actor dropped reply: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub async fn snapshot(&self) -> ClientModel {
        self.model.read().await.clone()
    }

    pub async fn node(&self) -> Option<NodeInfo> {
        self.model.read().await.node.clone()
    }

    pub async fn roster(&self) -> Roster {
        self.model.read().await.roster.clone()
    }

    pub async fn messages(&self) -> MessageLog {
        self.model.read().await.messages.clone()
    }

    /// Most recently published display model.
    pub fn display(&self) -> DisplayModel {
        self.display_tx.borrow().clone()
    }

    /// Follow display updates. The receiver starts at the current model.
    pub fn subscribe_display(&self) -> watch::Receiver<DisplayModel> {
        self.display_tx.subscribe()
    }

    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(self.command_capacity);

            // Store tx BEFORE spawning to avoid race
            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(state_actor(
                rx,
                Arc::clone(&self.model),
                Arc::clone(&self.display_tx),
            ));
            *init_guard = true;
            info!("State actor spawned");
        }
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new()
    }
}

/// The state actor task.
///
/// Runs until every [`SyncState`] handle is dropped.
async fn state_actor(
    mut command_rx: mpsc::Receiver<Envelope>,
    model: Arc<RwLock<ClientModel>>,
    display_tx: Arc<watch::Sender<DisplayModel>>,
) {
    info!("State actor started");

    while let Some(Envelope { command, reply }) = command_rx.recv().await {
        let display = {
            let mut model_write = model.write().await;
            model_write.apply(command);
            model_write.project()
        };

        display_tx.send_replace(display.clone());

        if reply.send(display).is_err() {
            debug!("State update caller went away before the reply");
        }
    }

    info!("State actor stopped");
}
