// Unit tests for inbound frame routing.

use crate::transport::frame::ServerFrame;
use crate::transport::router::Router;

use common::Channel;

use serde_json::json;
use tokio::sync::{mpsc, oneshot};

fn text(frame: &ServerFrame) -> String {
    serde_json::to_string(frame).unwrap()
}

#[tokio::test]
async fn given_pending_request_when_ok_reply_routed_then_waiter_receives_value() {
    // GIVEN: A registered request
    let router = Router::default();
    let (reply_tx, reply_rx) = oneshot::channel();
    router.register(String::from("r1"), reply_tx).await.unwrap();

    // WHEN: The matching reply arrives
    router
        .route(&text(&ServerFrame::ok("r1", json!({"node_id": "abc"}))))
        .await;

    // THEN: The waiter gets the ok value
    assert_eq!(reply_rx.await.unwrap(), Ok(json!({"node_id": "abc"})));
}

#[tokio::test]
async fn given_pending_request_when_error_reply_routed_then_waiter_receives_message() {
    let router = Router::default();
    let (reply_tx, reply_rx) = oneshot::channel();
    router.register(String::from("r1"), reply_tx).await.unwrap();

    router
        .route(&text(&ServerFrame::error("r1", "Client not initialized")))
        .await;

    assert_eq!(
        reply_rx.await.unwrap(),
        Err(String::from("Client not initialized"))
    );
}

#[tokio::test]
async fn given_subscriber_when_events_routed_then_only_its_channel_delivered() {
    // GIVEN: A subscriber on `connection` only
    let router = Router::default();
    let (sender, mut stream) = mpsc::channel(4);
    router.subscribe(Channel::Connection, sender).await;

    // WHEN: Events arrive for several channels, including unknown ones
    router
        .route(&text(&ServerFrame::event(Channel::Message, json!({"sender": "p1", "content": "x"}))))
        .await;
    router
        .route(r#"{"type":"event","event":"presence","payload":{}}"#)
        .await;
    router
        .route(&text(&ServerFrame::event(
            Channel::Connection,
            json!({"peer_id": "p1", "status": "connected"}),
        )))
        .await;
    router.route("garbage").await;

    // THEN: Exactly the connection event was delivered
    assert_eq!(
        stream.recv().await,
        Some(json!({"peer_id": "p1", "status": "connected"}))
    );
    assert!(stream.try_recv().is_err());
}

/// **VALUE**: Closing fails waiters and ends streams instead of hanging them.
///
/// **BUG THIS CATCHES**: Without the closed flag, a request registered after the
/// socket died would wait forever.
#[tokio::test]
async fn given_closed_router_when_request_registered_then_fails_fast() {
    // GIVEN: One pending request and one subscriber
    let router = Router::default();
    let (reply_tx, reply_rx) = oneshot::channel();
    router.register(String::from("r1"), reply_tx).await.unwrap();
    let (sender, mut stream) = mpsc::channel(4);
    router.subscribe(Channel::Message, sender).await;

    // WHEN: The connection closes
    router.close().await;

    // THEN: The waiter is released, the stream ends, new requests fail
    assert!(reply_rx.await.is_err());
    assert_eq!(stream.recv().await, None);
    let (late_tx, _late_rx) = oneshot::channel();
    assert!(router.register(String::from("r2"), late_tx).await.is_err());
}

/// **VALUE**: A reply whose error is not a plain string still reaches the requester.
///
/// **BUG THIS CATCHES**: An object-shaped `error` (e.g. `{"message": ..}`) making the
/// whole frame undecodable, so the waiter is never resolved and the caller hangs.
#[tokio::test]
async fn given_structured_error_reply_when_routed_then_waiter_receives_json_text() {
    // GIVEN: A registered request
    let router = Router::default();
    let (reply_tx, reply_rx) = oneshot::channel();
    router.register(String::from("r1"), reply_tx).await.unwrap();

    // WHEN: The backend answers with an error object
    router
        .route(r#"{"type":"reply","id":"r1","error":{"message":"boom"}}"#)
        .await;

    // THEN: The waiter is released with the object's JSON text
    assert_eq!(
        reply_rx.await.unwrap(),
        Err(String::from(r#"{"message":"boom"}"#))
    );
}

#[tokio::test]
async fn given_undecodable_reply_with_id_when_routed_then_waiter_fails() {
    let router = Router::default();
    let (reply_tx, reply_rx) = oneshot::channel();
    router.register(String::from("r1"), reply_tx).await.unwrap();

    router
        .route(r#"{"type":"reply","id":"r1","ok":1,"ok":2}"#)
        .await;

    let reply = reply_rx.await.unwrap();
    assert!(reply.unwrap_err().starts_with("Unreadable reply from backend"));
}
