use crate::alert::ConsoleNotifier;

use client_core::notify::{Notification, NotificationKind, Notifier};

#[test]
fn given_notification_when_notified_then_single_alert_line_written() {
    let notifier = ConsoleNotifier::new(Vec::new());

    notifier.notify(Notification::new(NotificationKind::Backend, "Relay unreachable"));
    notifier.notify(Notification::new(NotificationKind::Send, "Peer not connected"));

    let written = String::from_utf8(notifier.into_inner()).unwrap();
    assert_eq!(
        written,
        "[ALERT] P2P Error: Relay unreachable\n[ALERT] Message sending failed: Peer not connected\n"
    );
}
