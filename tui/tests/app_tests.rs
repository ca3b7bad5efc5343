//! App Tests
//!
//! Drive the terminal app against a `TestBackend` and a scripted event
//! stream. Time-based tests run on tokio's paused clock, so the tick
//! deadline fires in virtual time and the suite never waits in real time.

use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use futures::channel::mpsc;
use pretty_assertions::assert_eq;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::time::Instant;

use flapboard_core::{BoardType, FlapEngine, TileSize};
use flapboard_tui::{App, MessageDeck};

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn app(messages: &[&str]) -> App {
    App::new(FlapEngine::standard(), MessageDeck::from_args(messages))
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Input handling
// ============================================================================

#[test]
fn test_start_paints_without_deadline() {
    let mut app = app(&["HELLO"]);
    app.start(Instant::now());

    assert!(app.engine().is_settled());
    assert!(app.engine().display_text().starts_with("HELLO"));
    assert_eq!(app.next_deadline(), None);
}

#[test]
fn test_next_message_arms_deadline() {
    let mut app = app(&["HELLO", "WORLD"]);
    let now = Instant::now();
    app.start(now);

    app.handle_event(key('n'), now);
    assert!(!app.engine().is_settled());
    assert_eq!(
        app.next_deadline(),
        Some(now + app.engine().clock().interval())
    );
}

#[test]
fn test_loading_toggle() {
    let mut app = app(&["HELLO"]);
    let now = Instant::now();
    app.start(now);

    app.handle_event(key('l'), now);
    assert!(app.is_loading());
    assert!(app.engine().is_loading());
    assert!(app.next_deadline().is_some());

    app.handle_event(key('l'), now);
    assert!(!app.is_loading());
}

#[test]
fn test_visual_keys_do_not_animate() {
    let mut app = app(&["HELLO"]);
    let now = Instant::now();
    app.start(now);

    app.handle_event(key('b'), now);
    app.handle_event(key('s'), now);
    assert_eq!(app.board_type(), BoardType::White);
    assert_eq!(app.size(), TileSize::Lg);
    assert!(app.engine().is_settled());
    assert_eq!(app.next_deadline(), None);
}

#[test]
fn test_quit_keys() {
    for event in [
        key('q'),
        Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
    ] {
        let mut app = app(&["HELLO"]);
        app.start(Instant::now());
        app.handle_event(event, Instant::now());
        assert!(!app.is_running());
    }
}

#[test]
fn test_deadline_delivers_elapsed_ticks() {
    let mut app = app(&["A", "E"]);
    let start = Instant::now();
    app.start(start);
    app.handle_event(key('n'), start);

    let interval = app.engine().clock().interval();
    app.on_deadline(start + interval * 3);
    assert_eq!(app.engine().clock().tick_count(), 3);
    assert_eq!(app.next_deadline(), Some(start + interval * 4));

    app.on_deadline(start + interval * 4);
    assert!(app.engine().is_settled());
    assert_eq!(app.next_deadline(), None);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_renders_board_and_status() {
    let mut app = app(&["HELLO"]).with_visuals(BoardType::Black, TileSize::Sm);
    app.start(Instant::now());

    let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();

    let text = screen_text(&terminal);
    // 22 small tiles centered in 30 columns start at x = 4
    assert!(text.lines().any(|line| line.starts_with("    HELLO")), "{text}");
    assert!(text.lines().last().unwrap().contains("1/1"), "{text}");
}

#[test]
fn test_status_shows_loading() {
    let mut app = app(&["HELLO"]).with_loading(true);
    app.start(Instant::now());

    let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();
    assert!(screen_text(&terminal).contains("LOADING"));
}

// ============================================================================
// Event loop on virtual time
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_event_loop_animates_to_next_message() {
    let mut app = app(&["HELLO", "WORLD"]);
    let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
    let (tx, rx) = mpsc::unbounded::<io::Result<Event>>();

    tx.unbounded_send(Ok(key('n'))).unwrap();
    let script = async {
        // Longer than one full rotation
        tokio::time::sleep(Duration::from_secs(6)).await;
        tx.unbounded_send(Ok(key('q'))).unwrap();
    };

    let (result, ()) = tokio::join!(app.run_with_events(&mut terminal, rx), script);
    result.unwrap();

    assert!(!app.is_running());
    assert!(app.engine().is_settled());
    assert!(app.engine().display_text().starts_with("WORLD"));
    // O -> D is the longest trip: 60 steps forward around the wheel
    assert_eq!(app.engine().clock().tick_count(), 60);
    assert!(screen_text(&terminal).contains('W'));
}

#[tokio::test(start_paused = true)]
async fn test_event_loop_ends_when_stream_closes() {
    let mut app = app(&["HELLO"]);
    let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
    let (tx, rx) = mpsc::unbounded::<io::Result<Event>>();
    drop(tx);

    app.run_with_events(&mut terminal, rx).await.unwrap();
    assert!(!app.is_running());
    assert_eq!(app.engine().clock().tick_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_event_stream_error_is_returned() {
    let mut app = app(&["HELLO"]);
    let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
    let (tx, rx) = mpsc::unbounded::<io::Result<Event>>();
    tx.unbounded_send(Err(io::Error::other("tty gone"))).unwrap();

    let err = app.run_with_events(&mut terminal, rx).await.unwrap_err();
    assert!(err.to_string().contains("tty gone"));
}
