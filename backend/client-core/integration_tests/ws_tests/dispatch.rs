use super::helpers::{FakeNode, RecordingNotifier, Script, wait_for_display};

use client_core::dispatcher::Dispatcher;
use client_core::notify::{NotificationKind, SharedNotifier};
use client_core::state::SyncState;
use client_core::transport::WsBackend;
use common::Channel;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

/// **VALUE**: Events pushed by a real socket end up in the projection.
///
/// **WHY THIS MATTERS**: Exercises the whole inbound path: router, channel
/// stream, dispatcher task, state actor and projection.
#[tokio::test]
async fn given_subscribed_dispatcher_when_node_pushes_events_then_display_follows() {
    // GIVEN: A dispatcher listening on every channel
    let node = FakeNode::start(Script::default()).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();
    let state = SyncState::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let shared: SharedNotifier = notifier.clone();
    let handle = Dispatcher::new(state.clone(), shared).start(&backend).await;
    assert_eq!(handle.subscribed().len(), 3);
    let mut display = state.subscribe_display();

    // WHEN: The node reports a connection, a status change and a message
    node.push(Channel::Connection, json!({"peer_id": "p1", "status": "connecting"}));
    node.push(Channel::Connection, json!({"peer_id": "p1", "status": "connected"}));
    node.push(Channel::Message, json!({"sender": "p1", "content": "hello"}));

    // THEN: One roster entry with the latest status, one message line
    let model = wait_for_display(&mut display, |model| {
        model.messages.lines.len() == 1 && model.connections.lines == vec!["p1 - connected"]
    })
    .await;
    assert_eq!(model.messages.lines, vec!["p1: hello"]);
    assert!(notifier.notifications().is_empty());

    handle.abort();
}

#[tokio::test]
async fn given_disconnect_event_when_dispatched_then_peer_removed() {
    let node = FakeNode::start(Script::default()).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();
    let state = SyncState::new();
    let shared: SharedNotifier = Arc::new(RecordingNotifier::default());
    let handle = Dispatcher::new(state.clone(), shared).start(&backend).await;
    let mut display = state.subscribe_display();

    node.push(Channel::Connection, json!({"peer_id": "p1", "status": "connected"}));
    node.push(Channel::Connection, json!({"peer_id": "p2", "status": "connected"}));
    node.push(Channel::Connection, json!({"peer_id": "p1", "status": "disconnected"}));

    let model = wait_for_display(&mut display, |model| {
        model.connections.lines == vec!["p2 - connected"]
    })
    .await;
    assert!(model.connections.visible);

    handle.abort();
}

/// **VALUE**: One refused channel is reported while the others keep working.
#[tokio::test]
async fn given_refused_connection_channel_when_started_then_messages_still_flow() {
    // GIVEN: A node that refuses the connection channel
    let node = FakeNode::start(Script::default().refuse(Channel::Connection, "not available")).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();
    let state = SyncState::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let shared: SharedNotifier = notifier.clone();

    // WHEN: Starting the dispatcher and pushing a message
    let handle = Dispatcher::new(state.clone(), shared).start(&backend).await;
    let mut display = state.subscribe_display();
    node.push(Channel::Message, json!({"sender": "p3", "content": "still here"}));

    // THEN: Failure surfaced for `connection` only, message displayed
    assert_eq!(handle.subscribed().len(), 2);
    assert_eq!(handle.failures().len(), 1);
    assert_eq!(
        notifier.notifications()[0].kind,
        NotificationKind::Subscription("connection".to_string())
    );
    let model = wait_for_display(&mut display, |model| model.messages.visible).await;
    assert_eq!(model.messages.lines, vec!["p3: still here"]);

    handle.abort();
}

#[tokio::test]
async fn given_error_event_when_dispatched_then_user_alerted_without_state_change() {
    let node = FakeNode::start(Script::default()).await;
    let backend = WsBackend::connect(&node.url, 8).await.unwrap();
    let state = SyncState::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let shared: SharedNotifier = notifier.clone();
    let handle = Dispatcher::new(state.clone(), shared).start(&backend).await;
    let mut display = state.subscribe_display();

    // Error first, then a message on another channel as a progress marker
    node.push(Channel::Error, json!("Relay unreachable"));
    node.push(Channel::Message, json!({"sender": "p1", "content": "after"}));
    wait_for_display(&mut display, |model| model.messages.visible).await;

    let deadline = tokio::time::Instant::now() + super::helpers::WAIT;
    while notifier.notifications().is_empty() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].to_string(), "P2P Error: Relay unreachable");
    assert!(!state.display().connections.visible);

    handle.abort();
}
