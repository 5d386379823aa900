use client_core::error::{ClientError, StateError};
use common::{Channel, ErrorLocation};

use std::panic::Location;

/// **VALUE**: Channel-scoped errors name their channel in logs.
///
/// **BUG THIS CATCHES**: A subscription failure log that does not say which of
/// the three listens failed.
#[test]
fn given_subscription_error_when_formatted_then_includes_channel_and_location() {
    // GIVEN: A failed `error` subscription
    let err = ClientError::Subscription {
        channel: Channel::Error,
        message: "no such event".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting
    let formatted = err.to_string();

    // THEN: Kind, channel, message and file are present
    assert!(formatted.contains("Subscription Error (error)"));
    assert!(formatted.contains("no such event"));
    assert!(formatted.contains("client.rs"));
}

#[test]
fn given_state_error_when_formatted_then_includes_kind_and_location() {
    let err = StateError::Actor {
        message: "State actor died".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let formatted = err.to_string();

    assert!(formatted.contains("State actor died"));
    assert!(formatted.contains("client.rs"));
}

#[test]
fn given_any_client_error_when_message_read_then_bare_text() {
    let err = ClientError::Payload {
        channel: Channel::Message,
        message: "missing field `sender`".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    assert_eq!(err.message(), "missing field `sender`");
}
