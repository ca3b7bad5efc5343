//! Integration Test: Headless Core
//!
//! **Policy**: `flapboard-core` never reads a clock and never schedules
//! anything. Hosts pass elapsed time in through `advance`, which keeps every
//! transition deterministic and testable without waiting.

use architectural_enforcement::{assert_clean, find_patterns, rust_files};

#[test]
fn test_no_wall_clock_in_core() {
    let violations = find_patterns(
        "board/core/src",
        &["Instant::now", "SystemTime", "Instant::", "chrono::"],
    );
    assert_clean("Wall clock access found in flapboard-core", &violations);
}

#[test]
fn test_no_runtime_or_threads_in_core() {
    let violations = find_patterns(
        "board/core/src",
        &["tokio", "std::thread", "thread::spawn", "async fn", ".await"],
    );
    assert_clean("Runtime or thread use found in flapboard-core", &violations);
}

#[test]
fn test_core_does_not_depend_on_terminal() {
    let violations = find_patterns("board/core/src", &["ratatui", "crossterm"]);
    assert_clean("Terminal crates used in flapboard-core", &violations);
}

#[test]
fn test_scanned_trees_exist() {
    assert!(!rust_files("board/core/src").is_empty());
    assert!(!rust_files("tui/src").is_empty());
}
