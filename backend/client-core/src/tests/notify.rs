// User-facing notification text.

use crate::error::ClientError;
use crate::notify::{Notification, NotificationKind};

use common::{Channel, ErrorLocation};

use std::panic::Location;

#[test]
fn given_each_failure_kind_when_converted_then_user_text_matches() {
    let cases = [
        (
            ClientError::Initialization {
                message: String::from("boom"),
                location: ErrorLocation::from(Location::caller()),
            },
            "Initialization failed: boom",
        ),
        (
            ClientError::Send {
                message: String::from("peer offline"),
                location: ErrorLocation::from(Location::caller()),
            },
            "Message sending failed: peer offline",
        ),
        (
            ClientError::Subscription {
                channel: Channel::Connection,
                message: String::from("unavailable"),
                location: ErrorLocation::from(Location::caller()),
            },
            "Failed to listen for connection: unavailable",
        ),
        (
            ClientError::BackendReported {
                message: String::from("relay down"),
                location: ErrorLocation::from(Location::caller()),
            },
            "P2P Error: relay down",
        ),
    ];

    for (error, expected) in cases {
        assert_eq!(Notification::from(&error).to_string(), expected);
    }
}

/// **VALUE**: Notifications never leak source locations to the user.
#[test]
fn given_error_with_location_when_converted_then_location_not_in_message() {
    let error = ClientError::Send {
        message: String::from("peer offline"),
        location: ErrorLocation::from(Location::caller()),
    };

    let notification = Notification::from(&error);

    assert_eq!(notification.kind, NotificationKind::Send);
    assert_eq!(notification.message, "peer offline");
    assert!(error.to_string().contains("notify.rs"));
    assert!(!notification.to_string().contains("notify.rs"));
}
