use client_core::error::{BackendError, TransportError};
use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Transport failures keep their text when lifted into `BackendError`.
///
/// **WHY THIS MATTERS**: The user sees `BackendError::message()`. If the
/// conversion replaced it with a generic string, "Failed to connect to
/// ws://..." would become meaningless.
///
/// **BUG THIS CATCHES**: Would catch if `From<TransportError>` dropped the
/// message or lost `#[track_caller]`.
#[test]
fn given_transport_error_when_converted_then_message_and_location_kept() {
    // GIVEN: A closed-connection transport error
    let transport = TransportError::Closed {
        message: "Backend connection closed".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Converting to a backend error
    let err = BackendError::from(transport);

    // THEN: Same text, new location pointing here
    assert!(matches!(err, BackendError::Transport { .. }));
    assert_eq!(err.message(), "Backend connection closed");
    assert!(err.to_string().contains("backend.rs"));
}

#[test]
fn given_rejected_error_when_formatted_then_includes_kind_and_message() {
    let err = BackendError::Rejected {
        message: "Peer not connected".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let formatted = err.to_string();

    assert!(formatted.starts_with("Backend Rejected: Peer not connected"));
    assert!(formatted.contains("backend.rs"));
}

#[test]
fn given_bad_json_when_converted_then_json_transport_error() {
    let parse_failure = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

    let err = TransportError::from(parse_failure);

    assert!(matches!(err, TransportError::Json { .. }));
    assert!(err.to_string().starts_with("JSON Error:"));
}
