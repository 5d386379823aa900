use crate::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Error messages across the workspace end with `[file:line:column]`.
///
/// **BUG THIS CATCHES**: A changed Display format would silently break every
/// error message assertion downstream.
#[test]
fn given_location_when_displayed_then_formats_file_line_column() {
    // GIVEN: A location captured here
    let location = ErrorLocation::from(Location::caller());

    // WHEN: Formatting it
    let rendered = location.to_string();

    // THEN: It is bracketed and names this file
    assert!(rendered.starts_with('['));
    assert!(rendered.ends_with(']'));
    assert!(rendered.contains("error_location.rs"));
}

#[test]
fn given_panic_location_when_converted_then_points_at_capture_site() {
    let expected_line = line!() + 1;
    let location = ErrorLocation::from(Location::caller());

    assert_eq!(location.line, expected_line);
    assert!(location.file.ends_with("error_location.rs"));
}
