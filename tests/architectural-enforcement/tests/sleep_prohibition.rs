//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. The board only
//! ever waits on terminal events or on the engine's next tick deadline
//! (`sleep_until`), never on a fixed delay.
//! **Exceptions**: test code

use architectural_enforcement::{assert_clean, find_patterns};

const SLEEP_CALLS: &[&str] = &["::sleep(", ".sleep(", "thread::sleep"];

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = find_patterns("board/core/src", SLEEP_CALLS);
    violations.extend(find_patterns("tui/src", SLEEP_CALLS));

    assert_clean("Sleep calls found in production code", &violations);
}

#[test]
fn test_no_polling_interval_in_tui() {
    let violations = find_patterns("tui/src", &["tokio::time::interval", "interval.tick()"]);
    assert_clean(
        "Fixed-rate interval found in the TUI; wait on the engine deadline instead",
        &violations,
    );
}
