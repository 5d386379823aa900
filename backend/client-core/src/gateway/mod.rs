//! Outbound commands to the backend node.
//!
//! Both commands suspend only the caller; no timeout or cancellation is
//! applied, so a backend that never answers leaves the call pending.

mod backend;
mod compose;

pub use backend::NodeBackend;
pub use compose::ComposeForm;

use crate::error::ClientError;
use crate::notify::{Notification, SharedNotifier};
use crate::state::{StateCommand, SyncState};

use common::{ErrorLocation, NodeInfo, SendMessageArgs};

use std::future::Future;
use std::panic::Location;

use log::{debug, error, info};

pub struct CommandGateway<B> {
    backend: B,
    state: SyncState,
    notifier: SharedNotifier,
}

impl<B: NodeBackend> CommandGateway<B> {
    pub fn new(backend: B, state: SyncState, notifier: SharedNotifier) -> Self {
        Self {
            backend,
            state,
            notifier,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ask the backend to initialize the local node.
    ///
    /// Every call issues a new backend request. The first successful reply
    /// becomes the node identity; later successes are returned but do not
    /// replace it. On failure the identity is left as it was.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Initialization`] - Backend rejected or never delivered the request
    /// * [`ClientError::State`] - Identity could not be stored
    pub async fn initialize(&self) -> Result<NodeInfo, ClientError> {
        debug!("Requesting node initialization");

        let info = self.backend.initialize_client().await.map_err(|e| {
            self.surface(ClientError::Initialization {
                message: e.message().to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
        })?;

        info!("Client initialized: {}", info.node_id);

        self.state
            .update(StateCommand::SetNode(info.clone()))
            .await
            .map_err(|e| {
                self.surface(ClientError::State {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })
            })?;

        Ok(info)
    }

    /// Send the form's contents to its peer.
    ///
    /// The form is emptied as soon as this is called, before the returned
    /// future runs. It is not restored if the send fails. Nothing is
    /// validated: empty peer ids and empty content go to the backend as-is.
    ///
    /// # Errors
    ///
    /// * [`ClientError::Send`] - Backend rejected or never delivered the message
    pub fn send_message<'a>(
        &'a self,
        form: &mut ComposeForm,
    ) -> impl Future<Output = Result<(), ClientError>> + Send + use<'a, B> {
        let args = form.take();
        self.deliver(args)
    }

    async fn deliver(&self, args: SendMessageArgs) -> Result<(), ClientError> {
        debug!("Sending {} byte(s) to {}", args.content.len(), args.peer_id);

        match self.backend.send_message(args).await {
            Ok(()) => {
                info!("Message sent successfully");
                Ok(())
            }
            Err(e) => Err(self.surface(ClientError::Send {
                message: e.message().to_string(),
                location: ErrorLocation::from(Location::caller()),
            })),
        }
    }

    fn surface(&self, failure: ClientError) -> ClientError {
        error!("{failure}");
        self.notifier.notify(Notification::from(&failure));
        failure
    }
}
