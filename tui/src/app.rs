//! Main Application
//!
//! The App struct drives one [`FlapEngine`] from a terminal:
//! - Event loop (keyboard, resize)
//! - A single tick deadline, armed only while the engine clock runs
//! - Visual options (board finish, tile size) that never touch transitions
//!
//! # Scheduling
//!
//! The engine has no timers of its own. Each pass of the loop asks it how
//! long until the next tick and waits on either that deadline or the next
//! terminal event. When nothing is cycling there is no deadline at all, so
//! an idle board costs nothing but the event wait.

use std::future;
use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use tokio::time::Instant;
use tracing::{debug, info, trace};

use flapboard_core::{BoardType, FlapEngine, TileSize};

use crate::board_widget::BoardWidget;
use crate::messages::MessageDeck;
use crate::theme;

/// Key help shown in the status line
const KEY_HELP: &str = "n next  l loading  b board  s size  q quit";

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// The transition engine
    engine: FlapEngine,
    /// Messages cycled with `n`
    deck: MessageDeck,
    /// Loading flag fed to the engine
    loading: bool,

    // === Visual Options ===
    board_type: BoardType,
    size: TileSize,

    // === Timing ===
    /// When elapsed time was last handed to the engine
    last_advance: Instant,
}

impl App {
    /// Create a new App instance
    pub fn new(engine: FlapEngine, deck: MessageDeck) -> Self {
        Self {
            running: true,
            engine,
            deck,
            loading: false,
            board_type: BoardType::default(),
            size: TileSize::default(),
            last_advance: Instant::now(),
        }
    }

    /// Set the initial board finish and tile size
    pub fn with_visuals(mut self, board_type: BoardType, size: TileSize) -> Self {
        self.board_type = board_type;
        self.size = size;
        self
    }

    /// Start in the loading state
    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Main event loop on the real terminal event stream
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        self.run_with_events(terminal, EventStream::new()).await
    }

    /// Main event loop on any source of terminal events
    pub async fn run_with_events<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut events: S,
    ) -> anyhow::Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        self.start(Instant::now());
        terminal.draw(|frame| self.draw(frame))?;

        while self.running {
            let deadline = self.next_deadline();

            tokio::select! {
                biased;

                // Terminal events first so keys stay responsive mid-animation
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event, Instant::now()),
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        debug!("Event stream closed");
                        self.running = false;
                    }
                },

                _ = wait_for(deadline) => self.on_deadline(Instant::now()),
            }

            terminal.draw(|frame| self.draw(frame))?;
        }

        info!(ticks = self.engine.clock().tick_count(), "Event loop finished");
        Ok(())
    }

    /// Show the first message (first paint, no animation)
    pub fn start(&mut self, now: Instant) {
        self.apply_inputs(now);
        info!(
            rows = self.engine.geometry().rows(),
            cols = self.engine.geometry().cols(),
            messages = self.deck.len(),
            "Board started"
        );
    }

    /// When the loop should next wake up for a tick
    pub fn next_deadline(&self) -> Option<Instant> {
        self.engine
            .time_until_next_tick()
            .map(|wait| self.last_advance + wait)
    }

    /// Hand elapsed time to the engine
    pub fn on_deadline(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_advance);
        self.last_advance = now;

        let delivered = self.engine.advance(elapsed);
        trace!(
            ?elapsed,
            delivered,
            cycling = self.engine.cycling_count(),
            "Deadline reached"
        );
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            // Only handle Press events (not Release or Repeat)
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, now),
            Event::Resize(width, height) => debug!(width, height, "Terminal resized"),
            _ => {}
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),

            // Inputs that drive transitions
            KeyCode::Char('n') => {
                self.deck.advance();
                debug!(position = self.deck.position(), "Next message");
                self.apply_inputs(now);
            }
            KeyCode::Char('l') => {
                self.loading = !self.loading;
                debug!(loading = self.loading, "Loading toggled");
                self.apply_inputs(now);
            }

            // Visual only
            KeyCode::Char('b') => {
                self.board_type = self.board_type.toggled();
                debug!(board_type = ?self.board_type, "Board type toggled");
            }
            KeyCode::Char('s') => {
                self.size = self.size.next();
                debug!(size = ?self.size, "Tile size changed");
            }

            _ => {}
        }
    }

    fn quit(&mut self) {
        debug!("Quit requested");
        self.running = false;
    }

    /// Feed the current message and loading flag to the engine
    fn apply_inputs(&mut self, now: Instant) {
        let was_running = self.engine.clock().is_running();
        self.engine.update(Some(self.deck.current()), self.loading);

        // A clock that just started measures from now, not from its last run
        if !was_running {
            self.last_advance = now;
        }
    }

    /// Render the board and status line
    pub fn draw(&self, frame: &mut Frame) {
        let [board_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

        frame.render_widget(
            BoardWidget::new(&self.engine)
                .board_type(self.board_type)
                .size(self.size),
            board_area,
        );
        frame.render_widget(self.status_line(), status_area);
    }

    fn status_line(&self) -> Paragraph<'static> {
        let dim = Style::default().fg(theme::STATUS_DIM);
        let visuals = format!("{:?} {:?}", self.board_type, self.size).to_lowercase();
        let mut spans = vec![
            Span::styled(
                format!(" {}/{} ", self.deck.position() + 1, self.deck.len()),
                dim,
            ),
            Span::styled(format!("{visuals} "), dim),
        ];
        if self.loading {
            spans.push(Span::styled(
                "LOADING ",
                Style::default()
                    .fg(theme::STATUS_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::styled(format!(" {KEY_HELP}"), dim));

        Paragraph::new(Line::from(spans))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn engine(&self) -> &FlapEngine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn board_type(&self) -> BoardType {
        self.board_type
    }

    pub fn size(&self) -> TileSize {
        self.size
    }

    /// Stop the engine clock and release the board
    pub fn shutdown(self) {
        debug!(ticks = self.engine.clock().tick_count(), "Shutting down board");
        self.engine.teardown();
    }
}

/// Sleep until the deadline, or forever when there is none
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}
