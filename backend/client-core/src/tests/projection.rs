// Unit tests for the render projection.

use crate::message_log::{Message, MessageLog};
use crate::projection::project;
use crate::roster::Roster;

use common::{ConnectionEvent, NodeInfo};

#[test]
fn given_empty_state_when_projected_then_all_panels_hidden() {
    let display = project(None, &Roster::new(), &MessageLog::new());

    assert!(!display.node_identity.visible);
    assert!(!display.connections.visible);
    assert!(!display.messages.visible);
    assert!(display.connections.lines.is_empty());
}

#[test]
fn given_node_info_when_projected_then_identity_panel_shows_node_id() {
    let info = NodeInfo::new("abc");

    let display = project(Some(&info), &Roster::new(), &MessageLog::new());

    assert!(display.node_identity.visible);
    assert_eq!(display.node_identity.lines, vec!["abc".to_string()]);
}

#[test]
fn given_node_info_with_public_key_when_projected_then_key_listed_after_id() {
    let info = NodeInfo {
        node_id: String::from("abc"),
        public_key: Some(String::from("deadbeef")),
    };

    let display = project(Some(&info), &Roster::new(), &MessageLog::new());

    assert_eq!(display.node_identity.lines, vec!["abc", "deadbeef"]);
}

/// **VALUE**: Connection lines use the `"{peer} - {status}"` layout, in roster order.
#[test]
fn given_roster_when_projected_then_lines_follow_roster_order() {
    // GIVEN: Two peers, the first with an unknown status
    let mut roster = Roster::new();
    for (peer_id, status) in [("p9", "relayed"), ("p1", "connected")] {
        roster.reconcile(ConnectionEvent {
            peer_id: peer_id.to_string(),
            status: status.to_string(),
        });
    }

    // WHEN: Projecting
    let display = project(None, &roster, &MessageLog::new());

    // THEN: Panel shown with both lines, first-seen first
    assert!(display.connections.visible);
    assert_eq!(display.connections.lines, vec!["p9 - relayed", "p1 - connected"]);
}

#[test]
fn given_roster_emptied_when_projected_then_connections_panel_hidden_again() {
    let mut roster = Roster::new();
    roster.reconcile(ConnectionEvent {
        peer_id: String::from("p1"),
        status: String::from("connected"),
    });
    roster.reconcile(ConnectionEvent {
        peer_id: String::from("p1"),
        status: String::from("disconnected"),
    });

    let display = project(None, &roster, &MessageLog::new());

    assert!(!display.connections.visible);
}

#[test]
fn given_duplicate_messages_when_projected_then_each_rendered_in_order() {
    let mut log = MessageLog::new();
    for (sender, content) in [("p1", "hi"), ("p2", "yo"), ("p1", "hi")] {
        log.append(Message {
            sender: sender.to_string(),
            content: content.to_string(),
        });
    }

    let display = project(None, &Roster::new(), &log);

    assert!(display.messages.visible);
    assert_eq!(display.messages.lines, vec!["p1: hi", "p2: yo", "p1: hi"]);
}
