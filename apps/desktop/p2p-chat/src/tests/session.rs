// Console session driven by scripted input against an in-memory backend.

use crate::app::Session;
use crate::commands::ShellCommand;

use client_core::config::ClientConfig;
use client_core::error::BackendError;
use client_core::gateway::NodeBackend;
use client_core::notify::{Notification, Notifier, SharedNotifier};
use common::{ErrorLocation, NodeInfo, SendMessageArgs};

use std::panic::Location;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct ScriptedBackend {
    sent: Arc<Mutex<Vec<SendMessageArgs>>>,
    fail_init: bool,
}

impl NodeBackend for ScriptedBackend {
    async fn initialize_client(&self) -> Result<NodeInfo, BackendError> {
        if self.fail_init {
            return Err(BackendError::Rejected {
                message: "Keypair unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(NodeInfo::new("node-abc"))
    }

    async fn send_message(&self, args: SendMessageArgs) -> Result<(), BackendError> {
        self.sent.lock().unwrap().push(args);
        Ok(())
    }
}

#[derive(Default)]
struct Alerts(Mutex<Vec<Notification>>);

impl Notifier for Alerts {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

fn session(backend: ScriptedBackend) -> (Session<ScriptedBackend>, Arc<Alerts>) {
    let alerts = Arc::new(Alerts::default());
    let notifier: SharedNotifier = alerts.clone();
    (Session::new(backend, &ClientConfig::default(), notifier), alerts)
}

/// **VALUE**: `/peer` then `/send` sends exactly what was typed and empties the form.
#[tokio::test]
async fn given_peer_and_content_when_sent_then_backend_receives_and_form_cleared() {
    // GIVEN: A session
    let backend = ScriptedBackend::default();
    let (mut session, alerts) = session(backend.clone());

    // WHEN: Setting a peer and sending
    session.execute(ShellCommand::Peer("p1".to_string())).await;
    session.execute(ShellCommand::Send("hello".to_string())).await;

    // THEN: One message went out and the form is empty
    assert_eq!(
        *backend.sent.lock().unwrap(),
        vec![SendMessageArgs {
            peer_id: "p1".to_string(),
            content: "hello".to_string(),
        }]
    );
    assert!(session.form().is_empty());
    assert!(alerts.0.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_second_send_without_peer_when_sent_then_empty_peer_forwarded() {
    let backend = ScriptedBackend::default();
    let (mut session, _alerts) = session(backend.clone());

    session.execute(ShellCommand::Peer("p1".to_string())).await;
    session.execute(ShellCommand::Send("one".to_string())).await;
    session.execute(ShellCommand::Send("two".to_string())).await;

    let sent = backend.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].peer_id, "");
    assert_eq!(sent[1].content, "two");
}

#[tokio::test]
async fn given_init_when_executed_then_identity_displayed() {
    let (mut session, _alerts) = session(ScriptedBackend::default());

    session.execute(ShellCommand::Init).await;

    assert_eq!(session.state.display().node_identity.lines, vec!["node-abc"]);
}

#[tokio::test]
async fn given_failing_init_when_executed_then_alerted_and_session_continues() {
    let (mut session, alerts) = session(ScriptedBackend {
        fail_init: true,
        ..ScriptedBackend::default()
    });

    session.execute(ShellCommand::Init).await;

    let alerts = alerts.0.lock().unwrap().clone();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].to_string(), "Initialization failed: Keypair unavailable");
    assert!(!session.state.display().node_identity.visible);
}

/// **VALUE**: Input stops at `/quit`; later lines are never executed.
#[tokio::test]
async fn given_script_with_quit_when_read_then_stops_at_quit() {
    // GIVEN: Input with a send after /quit
    let backend = ScriptedBackend::default();
    let (session, _alerts) = session(backend.clone());
    let input: &[u8] = b"/peer p1\nfirst\n\n/bogus\n/quit\n/peer p2\nsecond\n";

    // WHEN: Reading commands
    session.read_commands(input).await.unwrap();

    // THEN: Only the message before /quit went out; unknown command skipped
    let sent = backend.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content, "first");
}
