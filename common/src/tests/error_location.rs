use crate::ErrorLocation;

/// **VALUE**: Verifies that `ErrorLocation::capture()` records the call site.
///
/// **WHY THIS MATTERS**: Every structured error in the workspace carries an
/// ErrorLocation. If capture points at the constructor instead of the caller,
/// every error message in the log reports the wrong position.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from
/// `capture()` during a refactor.
#[test]
fn given_capture_called_when_location_recorded_then_points_at_call_site() {
    // GIVEN / WHEN: Capturing from this test
    let location = ErrorLocation::capture();

    // THEN: File is this test file, not error_location.rs in src/error
    assert!(
        location.file.ends_with("tests/error_location.rs"),
        "Should record the caller's file, got {}",
        location.file
    );
    assert!(location.line > 0, "Should record a line number");
    assert!(location.column > 0, "Should record a column");
}

/// **VALUE**: Verifies the Display format stays `[file:line:column]`.
///
/// **WHY THIS MATTERS**: Error variants interpolate the location into their
/// message; a format change silently degrades every log line.
#[test]
fn given_location_when_formatted_then_bracketed_file_line_column() {
    // GIVEN: A captured location
    let location = ErrorLocation::capture();

    // WHEN: Formatting it
    let formatted = format!("{location}");

    // THEN: Bracketed, two colons
    assert!(formatted.starts_with('['), "Should start with '['");
    assert!(formatted.ends_with(']'), "Should end with ']'");
    assert_eq!(formatted.matches(':').count(), 2, "Should have exactly 2 colons");
    assert!(
        formatted.contains(&location.line.to_string()),
        "Should include the line number"
    );
}

/// **VALUE**: Verifies `#[track_caller]` propagates through helper functions.
///
/// **WHY THIS MATTERS**: Error constructors in capability-core wrap
/// `capture()` behind their own `#[track_caller]` functions; if propagation
/// breaks, all faults report the constructor's position.
#[test]
fn given_tracked_helper_when_called_twice_then_distinct_lines() {
    #[track_caller]
    fn here() -> ErrorLocation {
        ErrorLocation::capture()
    }

    let first = here();
    let second = here();

    assert_eq!(first.file, second.file, "Same file for both call sites");
    assert_ne!(first.line, second.line, "Each call site keeps its own line");
}
