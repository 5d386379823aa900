// Unit tests for logger module initialization logic
// Only one test may install the global logger per process.

use crate::logger::{initialize, log_file_path, shows_on_console};

use std::path::Path;

use log::{Level, Metadata};

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: Logger initialization might be reached from more than
/// one startup path. If the second call errors, the console would exit before
/// it ever connected.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to fail when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempfile::tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path());
    let result2 = initialize(temp_dir.path());

    // THEN: Both return Ok and the log file exists
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
    assert!(temp_dir.path().join("p2p-chat.log").exists());
}

/// **VALUE**: Only this crate's warnings and errors reach the terminal.
///
/// **WHY THIS MATTERS**: Stdout carries the rendered display and stderr carries
/// alerts. Echoing client-core's `error!` lines there would print every
/// failure twice.
#[test]
fn given_records_from_various_targets_when_filtered_then_only_app_warnings_shown() {
    // GIVEN: Records at different levels and targets
    let cases = [
        ("p2p_chat::settings", Level::Warn, true),
        ("p2p_chat::app", Level::Error, true),
        ("p2p_chat::app", Level::Info, false),
        ("client_core::gateway", Level::Error, false),
        ("tokio_tungstenite", Level::Warn, false),
    ];

    for (target, level, expected) in cases {
        // WHEN: Asking whether the terminal shows it
        let metadata = Metadata::builder().target(target).level(level).build();

        // THEN: Matches the expectation
        assert_eq!(shows_on_console(&metadata), expected, "{target} {level}");
    }
}

#[test]
fn given_log_dir_when_path_resolved_then_fixed_file_name() {
    let path = log_file_path(Path::new("/var/chat/logs"));

    assert_eq!(path, Path::new("/var/chat/logs/p2p-chat.log"));
}
