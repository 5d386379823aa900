use crate::dispatcher::{EventSource, EventStream};
use crate::error::{BackendError, TransportError};
use crate::gateway::NodeBackend;
use crate::transport::frame::ClientFrame;
use crate::transport::router::Router;

use common::contract::{INITIALIZE_CLIENT_COMMAND, SEND_MESSAGE_COMMAND};
use common::{Channel, ErrorLocation, NodeInfo, SendMessageArgs};

use std::panic::Location;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use serde_json::{Value, json};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use uuid::Uuid;

const OUTBOUND_CAPACITY: usize = 32;

/// Connection to a backend node over WebSocket.
///
/// Implements both [`NodeBackend`] and [`EventSource`]. Clones share the
/// same socket. The socket is closed once every clone has been dropped.
#[derive(Clone)]
pub struct WsBackend {
    outbound: mpsc::Sender<ClientFrame>,
    router: Arc<Router>,
    channel_capacity: usize,
}

impl WsBackend {
    /// Connect to `url` and start the reader and writer tasks.
    ///
    /// # Arguments
    ///
    /// * `url` - Backend WebSocket URL, e.g. `ws://127.0.0.1:3341`
    /// * `channel_capacity` - Buffered events per subscribed channel
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Connect`] if the WebSocket handshake fails.
    pub async fn connect(url: &str, channel_capacity: usize) -> Result<Self, TransportError> {
        let (ws_stream, _) = connect_async(url).await.map_err(|e| {
            error!("Failed to connect to backend at {url}: {e}");
            TransportError::Connect {
                message: format!("Failed to connect to {url}: {e}"),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        info!("Connected to backend at {url}");

        let (mut write, mut read) = ws_stream.split();
        let (outbound, mut outbound_rx) = mpsc::channel::<ClientFrame>(OUTBOUND_CAPACITY);
        let router = Arc::new(Router::default());

        tokio::spawn(async move {
            while let Some(frame) = outbound_rx.recv().await {
                let text = match serde_json::to_string(&frame) {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Failed to encode frame {}: {e}", frame.id());
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::text(text)).await {
                    error!("Failed to write to backend: {e}");
                    break;
                }
            }
            debug!("Writer task finished, closing socket");
            if let Err(e) = write.close().await {
                debug!("Socket close failed: {e}");
            }
        });

        let reader_router = Arc::clone(&router);
        tokio::spawn(async move {
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => reader_router.route(text.as_str()).await,
                    Ok(Message::Close(_)) => break,
                    Ok(_) => debug!("Ignoring non-text frame from backend"),
                    Err(e) => {
                        error!("Error reading from backend: {e}");
                        break;
                    }
                }
            }
            reader_router.close().await;
        });

        Ok(Self {
            outbound,
            router,
            channel_capacity: channel_capacity.max(1),
        })
    }

    async fn request(&self, frame: ClientFrame) -> Result<Value, BackendError> {
        let id = frame.id().to_string();
        let (reply_tx, reply_rx) = oneshot::channel();

        self.router.register(id.clone(), reply_tx).await?;

        if self.outbound.send(frame).await.is_err() {
            self.router.forget(&id).await;
            return Err(BackendError::from(TransportError::Send {
                message: "Backend writer has stopped".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }));
        }

        match reply_rx.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(BackendError::Rejected {
                message,
                location: ErrorLocation::from(Location::caller()),
            }),
            Err(_) => Err(BackendError::Transport {
                message: "Backend connection closed before reply".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn invoke(&self, cmd: &str, args: Value) -> Result<Value, BackendError> {
        debug!("Invoking {cmd}");
        self.request(ClientFrame::Invoke {
            id: new_request_id(),
            cmd: cmd.to_string(),
            args,
        })
        .await
    }
}

impl NodeBackend for WsBackend {
    async fn initialize_client(&self) -> Result<NodeInfo, BackendError> {
        let value = self.invoke(INITIALIZE_CLIENT_COMMAND, json!({})).await?;
        let info = serde_json::from_value(value).map_err(TransportError::from)?;
        Ok(info)
    }

    async fn send_message(&self, args: SendMessageArgs) -> Result<(), BackendError> {
        let args = serde_json::to_value(args).map_err(TransportError::from)?;
        self.invoke(SEND_MESSAGE_COMMAND, args).await?;
        Ok(())
    }
}

impl EventSource for WsBackend {
    async fn listen(&self, channel: Channel) -> Result<EventStream, BackendError> {
        let (sender, stream) = mpsc::channel(self.channel_capacity);

        // Registered before the request so nothing sent right after the
        // acknowledgement is dropped.
        self.router.subscribe(channel, sender).await;

        let frame = ClientFrame::Listen {
            id: new_request_id(),
            event: channel.as_str().to_string(),
        };

        match self.request(frame).await {
            Ok(_) => Ok(stream),
            Err(e) => {
                warn!("Backend refused {channel} subscription: {e}");
                self.router.unsubscribe(channel).await;
                Err(e)
            }
        }
    }
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}
