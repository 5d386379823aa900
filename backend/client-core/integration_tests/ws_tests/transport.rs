use super::helpers::{FakeNode, Script};

use client_core::dispatcher::EventSource;
use client_core::error::{BackendError, TransportError};
use client_core::gateway::NodeBackend;
use client_core::transport::{ClientFrame, WsBackend};
use common::{Channel, NodeInfo, SendMessageArgs};

use serde_json::json;

/// **VALUE**: `initialize_client` is invoked with empty args and its reply decoded.
#[tokio::test]
async fn given_node_when_initialize_client_then_node_info_decoded() {
    // GIVEN: A node that answers with an identity
    let node = FakeNode::start(Script::default()).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();

    // WHEN: Initializing
    let info = backend.initialize_client().await.unwrap();

    // THEN: Identity decoded, request shaped as the node expects
    assert_eq!(
        info,
        NodeInfo {
            node_id: "node-abc".to_string(),
            public_key: Some("pk-123".to_string()),
        }
    );
    let received = node.received();
    assert!(matches!(
        &received[0],
        ClientFrame::Invoke { cmd, args, .. } if cmd == "initialize_client" && *args == json!({})
    ));
}

#[tokio::test]
async fn given_send_message_when_invoked_then_args_use_peer_id_key() {
    let node = FakeNode::start(Script::default()).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();

    backend
        .send_message(SendMessageArgs {
            peer_id: "p1".to_string(),
            content: "hi".to_string(),
        })
        .await
        .unwrap();

    let received = node.received();
    assert!(matches!(
        &received[0],
        ClientFrame::Invoke { cmd, args, .. }
            if cmd == "send_message" && *args == json!({"peerId": "p1", "content": "hi"})
    ));
}

#[tokio::test]
async fn given_rejecting_node_when_send_message_then_rejected_with_backend_text() {
    let node = FakeNode::start(Script {
        send_error: Some("Peer not connected".to_string()),
        ..Script::default()
    })
    .await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();

    let err = backend
        .send_message(SendMessageArgs::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Rejected { .. }));
    assert_eq!(err.message(), "Peer not connected");
}

/// **VALUE**: A refused listen fails only that channel.
#[tokio::test]
async fn given_refused_channel_when_listen_then_error_and_other_channels_work() {
    let node = FakeNode::start(Script::default().refuse(Channel::Error, "no such event")).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();

    let refused = backend.listen(Channel::Error).await;
    let mut messages = backend.listen(Channel::Message).await.unwrap();
    node.push(Channel::Message, json!({"sender": "p1", "content": "x"}));

    assert_eq!(refused.unwrap_err().message(), "no such event");
    assert_eq!(
        messages.recv().await,
        Some(json!({"sender": "p1", "content": "x"}))
    );
}

/// **VALUE**: A request in flight when the node goes away fails instead of hanging.
///
/// **BUG THIS CATCHES**: Pending waiters not being released on socket close.
#[tokio::test]
async fn given_node_hangs_up_when_request_pending_then_transport_error() {
    // GIVEN: A node that drops the connection on any invoke
    let node = FakeNode::start(Script {
        hang_up_on_invoke: true,
        ..Script::default()
    })
    .await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();

    // WHEN: Initializing
    let first = backend.initialize_client().await;

    // THEN: Transport failure, and later requests fail fast
    assert!(matches!(first, Err(BackendError::Transport { .. })));
    let second = backend.initialize_client().await;
    assert!(matches!(second, Err(BackendError::Transport { .. })));
}

#[tokio::test]
async fn given_nothing_listening_when_connect_then_connect_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    let result = WsBackend::connect(&url, 8).await;

    assert!(matches!(result, Err(TransportError::Connect { .. })));
}
