//! Grid Controller
//!
//! [`FlapEngine`] owns every cell of a board plus the board's single
//! [`AnimationClock`]. It reacts to exactly two inputs, the message and the
//! loading flag, and turns changes in them into cell events:
//!
//! | input change                         | cell event                        |
//! |--------------------------------------|-----------------------------------|
//! | first message, not loading           | none: cells painted settled       |
//! | loading false → true                 | `StartLoading` on every cell      |
//! | loading true → false                 | `StopLoading(target)` per cell    |
//! | message changed, not loading         | `SetTarget` where target differs  |
//!
//! The engine is the only thing that starts or stops the clock. On each
//! tick it sends the same `Tick` to every cycling cell, in index order;
//! cells never read each other so the order has no effect on the outcome.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::alphabet::Alphabet;
use crate::cell::{CellAttributes, CellEvent, CellPosition, CellState, CellView};
use crate::clock::{AnimationClock, FULL_CYCLE};
use crate::error::EngineError;
use crate::grid::{BoardGeometry, Grid};
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// Construction parameters for an engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Board dimensions
    pub geometry: BoardGeometry,
    /// Time for one full wheel rotation
    pub full_cycle: Duration,
    /// Wheel order
    pub alphabet: Alphabet,
}

impl EngineConfig {
    /// Defaults for a given geometry
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    /// Override the full rotation time
    #[must_use]
    pub fn with_full_cycle(mut self, full_cycle: Duration) -> Self {
        self.full_cycle = full_cycle;
        self
    }

    /// Override the wheel order
    #[must_use]
    pub fn with_alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            geometry: BoardGeometry::FLAGSHIP,
            full_cycle: FULL_CYCLE,
            alphabet: Alphabet::standard(),
        }
    }
}

/// Serializable view of the whole board
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub is_loading: bool,
    pub clock_running: bool,
    pub tick_count: u64,
    pub cells: Vec<CellAttributes>,
}

/// The split-flap transition engine
#[derive(Debug)]
pub struct FlapEngine {
    alphabet: Alphabet,
    tokenizer: Tokenizer,
    /// Row-major cell states
    cells: Vec<CellState>,
    clock: AnimationClock,
    /// Last message seen (applied or pending behind loading)
    message: Option<String>,
    is_loading: bool,
    /// Targets most recently committed to the cells
    committed: Grid,
    /// Whether anything has been shown yet (first paint or animation)
    painted: bool,
}

impl FlapEngine {
    /// Build an engine; every cell starts blank and idle, the clock stopped.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let EngineConfig {
            geometry,
            full_cycle,
            alphabet,
        } = config;

        if !alphabet.contains(Token::BLANK) {
            return Err(EngineError::InvalidAlphabet(
                "alphabet must contain the blank flap".to_string(),
            ));
        }
        let clock = AnimationClock::for_wheel(full_cycle, alphabet.len())?;

        Ok(Self::assemble(geometry, alphabet, clock))
    }

    /// Engine for the standard 6×22 board and wheel
    pub fn standard() -> Self {
        Self::assemble(
            BoardGeometry::FLAGSHIP,
            Alphabet::standard(),
            AnimationClock::standard(),
        )
    }

    fn assemble(geometry: BoardGeometry, alphabet: Alphabet, clock: AnimationClock) -> Self {
        let cells = (0..geometry.rows())
            .flat_map(|row| (0..geometry.cols()).map(move |col| CellPosition::new(row, col)))
            .map(CellState::new)
            .collect();

        debug!(
            rows = geometry.rows(),
            cols = geometry.cols(),
            wheel = alphabet.len(),
            "Flap engine created"
        );

        Self {
            tokenizer: Tokenizer::with_alphabet(geometry, alphabet.clone()),
            alphabet,
            cells,
            clock,
            message: None,
            is_loading: false,
            committed: Grid::blank(geometry),
            painted: false,
        }
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Apply the current inputs.
    ///
    /// Call whenever either input may have changed; unchanged inputs are a
    /// no-op. A `None` message never drives a transition on its own.
    pub fn update(&mut self, message: Option<&str>, is_loading: bool) {
        let was_loading = self.is_loading;
        let message_changed = self.message.as_deref() != message;

        self.is_loading = is_loading;
        if message_changed {
            self.message = message.map(str::to_owned);
        }

        match (was_loading, is_loading) {
            (false, true) => self.start_loading(),
            (true, false) => self.stop_loading(),
            // Message is remembered and committed when loading ends
            (true, true) => {}
            (false, false) => match message {
                Some(message) if !self.painted => self.first_paint(message),
                Some(message) if message_changed => self.retarget(message),
                _ => {}
            },
        }

        self.sync_clock();
    }

    /// Change only the message, keeping the loading flag
    pub fn set_message(&mut self, message: Option<&str>) {
        self.update(message, self.is_loading);
    }

    /// Change only the loading flag, keeping the message
    pub fn set_loading(&mut self, is_loading: bool) {
        let message = self.message.clone();
        self.update(message.as_deref(), is_loading);
    }

    fn first_paint(&mut self, message: &str) {
        let grid = self.tokenizer.tokenize(Some(message));
        for (cell, &token) in self.cells.iter_mut().zip(grid.tokens()) {
            *cell = CellState::settled(cell.position(), token);
        }
        self.clock.reset();
        self.committed = grid;
        self.painted = true;
        debug!("First paint, no animation");
    }

    fn start_loading(&mut self) {
        for id in 0..self.cells.len() {
            self.dispatch(id, CellEvent::StartLoading);
        }
        self.painted = true;
        debug!(cells = self.cells.len(), "Loading started");
    }

    fn stop_loading(&mut self) {
        // Without a message, settle back on whatever was last committed
        let grid = match self.message.as_deref() {
            Some(message) => self.tokenizer.tokenize(Some(message)),
            None => self.committed.clone(),
        };

        for (id, &target) in grid.tokens().iter().enumerate() {
            self.dispatch(id, CellEvent::StopLoading(target));
        }
        self.committed = grid;
        debug!(cycling = self.clock.subscriber_count(), "Loading stopped");
    }

    fn retarget(&mut self, message: &str) {
        let grid = self.tokenizer.tokenize(Some(message));
        let changes: Vec<(usize, Token)> = grid
            .tokens()
            .iter()
            .zip(self.committed.tokens())
            .enumerate()
            .filter(|(_, (new, old))| new != old)
            .map(|(id, (&new, _))| (id, new))
            .collect();

        for &(id, target) in &changes {
            self.dispatch(id, CellEvent::SetTarget(target));
        }
        self.committed = grid;
        debug!(changed = changes.len(), "Message changed");
    }

    /// Send one event to one cell and keep its clock subscription in sync
    fn dispatch(&mut self, id: usize, event: CellEvent) {
        let next = self.cells[id].reduce(event, &self.alphabet);
        self.cells[id] = next;

        if next.is_cycling() {
            self.clock.subscribe(id);
        } else {
            self.clock.unsubscribe(id);
        }
    }

    fn sync_clock(&mut self) {
        if self.clock.has_subscribers() {
            self.clock.start();
        } else {
            self.clock.stop();
        }
    }

    // =========================================================================
    // Time
    // =========================================================================

    /// Deliver one tick to every cycling cell.
    ///
    /// Returns the number of cells that settled on this tick. The clock is
    /// stopped when the last cycling cell settles.
    pub fn tick(&mut self) -> usize {
        if !self.clock.is_running() {
            return 0;
        }

        let subscribers: Vec<usize> = self.clock.subscribers().collect();
        self.clock.record_tick();

        let mut settled = 0;
        for id in subscribers {
            self.dispatch(id, CellEvent::Tick);
            if !self.cells[id].is_cycling() {
                settled += 1;
            }
        }

        trace!(
            tick = self.clock.tick_count(),
            settled,
            cycling = self.clock.subscriber_count(),
            "Tick"
        );

        self.sync_clock();
        settled
    }

    /// Advance by elapsed wall time, running every tick that falls due.
    ///
    /// At most one full rotation of ticks is delivered per call: every
    /// targeted cell has settled by then, and a loading board is at the
    /// same phase it would reach after any longer stall.
    ///
    /// Returns the number of ticks delivered.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let rotation = u32::try_from(self.alphabet.len()).unwrap_or(u32::MAX);
        let due = self.clock.advance(elapsed).min(rotation);
        let mut delivered = 0;
        for _ in 0..due {
            if !self.clock.is_running() {
                break;
            }
            self.tick();
            delivered += 1;
        }
        delivered
    }

    /// Time until the next tick, `None` when nothing is animating
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.clock.time_until_next_tick()
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Observable state of one cell
    pub fn cell(&self, row: usize, col: usize) -> Option<CellView> {
        self.geometry()
            .index_of(row, col)
            .map(|i| self.cells[i].view())
    }

    /// Observable state of every cell, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.cells.iter().map(CellState::view)
    }

    /// Raw cell state (for ticks-to-settle and similar introspection)
    pub fn cell_state(&self, row: usize, col: usize) -> Option<&CellState> {
        self.geometry().index_of(row, col).map(|i| &self.cells[i])
    }

    /// Whether no cell is cycling
    pub fn is_settled(&self) -> bool {
        !self.clock.has_subscribers()
    }

    /// Number of cycling cells
    pub fn cycling_count(&self) -> usize {
        self.clock.subscriber_count()
    }

    /// Currently shown glyphs as text, one line per row
    pub fn display_text(&self) -> String {
        self.cells
            .chunks(self.geometry().cols())
            .map(|row| row.iter().map(|c| c.current().glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serializable snapshot of the board
    pub fn snapshot(&self) -> BoardSnapshot {
        let geometry = self.geometry();
        BoardSnapshot {
            rows: geometry.rows(),
            cols: geometry.cols(),
            is_loading: self.is_loading,
            clock_running: self.clock.is_running(),
            tick_count: self.clock.tick_count(),
            cells: self.cells().map(CellAttributes::from).collect(),
        }
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.tokenizer.geometry()
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Last message seen
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Targets most recently committed to the cells
    pub fn committed_targets(&self) -> &Grid {
        &self.committed
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stop the clock and discard all state
    pub fn teardown(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if self.clock.has_subscribers() || !self.cells.is_empty() {
            debug!(ticks = self.clock.tick_count(), "Flap engine torn down");
        }
        self.clock.reset();
        self.cells.clear();
    }
}

impl Drop for FlapEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
