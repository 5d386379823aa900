use super::helpers::{FakeNode, RecordingNotifier, Script};

use client_core::error::ClientError;
use client_core::gateway::{CommandGateway, ComposeForm};
use client_core::notify::{NotificationKind, SharedNotifier};
use client_core::state::SyncState;
use client_core::transport::WsBackend;

use std::sync::Arc;

async fn connect(script: Script) -> (FakeNode, CommandGateway<WsBackend>, SyncState, Arc<RecordingNotifier>) {
    let node = FakeNode::start(script).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();
    let state = SyncState::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let shared: SharedNotifier = notifier.clone();
    let gateway = CommandGateway::new(backend, state.clone(), shared);
    (node, gateway, state, notifier)
}

#[tokio::test]
async fn given_node_when_initialize_then_identity_panel_shown() {
    let (_node, gateway, state, notifier) = connect(Script::default()).await;

    gateway.initialize().await.unwrap();

    let display = state.display();
    assert!(display.node_identity.visible);
    assert_eq!(display.node_identity.lines, vec!["node-abc", "pk-123"]);
    assert!(notifier.notifications().is_empty());
}

/// **VALUE**: A backend-side init failure reaches the user with its text.
#[tokio::test]
async fn given_failing_node_when_initialize_then_user_notified_and_identity_hidden() {
    // GIVEN: A node whose initialize fails
    let (_node, gateway, state, notifier) = connect(Script {
        init_reply: Err("Keypair unavailable".to_string()),
        ..Script::default()
    })
    .await;

    // WHEN: Initializing
    let result = gateway.initialize().await;

    // THEN: Error returned and surfaced, nothing shown
    assert!(matches!(result, Err(ClientError::Initialization { .. })));
    assert_eq!(
        notifier.notifications()[0].to_string(),
        "Initialization failed: Keypair unavailable"
    );
    assert!(!state.display().node_identity.visible);
}

#[tokio::test]
async fn given_rejecting_node_when_send_then_form_stays_cleared() {
    let (_node, gateway, _state, notifier) = connect(Script {
        send_error: Some("Peer not connected".to_string()),
        ..Script::default()
    })
    .await;
    let mut form = ComposeForm::new();
    form.set_peer_id("p9");
    form.set_content("hello");

    let result = gateway.send_message(&mut form).await;

    assert!(matches!(result, Err(ClientError::Send { .. })));
    assert!(form.is_empty());
    assert_eq!(notifier.notifications()[0].kind, NotificationKind::Send);
}
