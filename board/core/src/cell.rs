//! Cell State Machine
//!
//! Each cell models one flap wheel. Its logic is a pure reducer
//! `(CellState, CellEvent) -> CellState`; cells never look at each other
//! and never touch the clock. The engine feeds them events and decides
//! when they need ticks.
//!
//! # States
//!
//! ```text
//!                SetTarget(t != current)
//!                StopLoading(t != current)
//!                StartLoading
//!        ┌──────┐ ─────────────────────────► ┌─────────┐
//!        │ Idle │                            │ Cycling │ ◄─┐ Tick (not there yet)
//!        └──────┘ ◄───────────────────────── └─────────┘ ──┘
//!                  Tick reaching the target
//! ```
//!
//! While cycling with no committed target (loading) the wheel free-runs.
//! Committing a target never resets the wheel, so there is no visual jump
//! between loading and settling.

use serde::{Deserialize, Serialize};

use crate::alphabet::Alphabet;
use crate::token::Token;

/// Row/column of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Animation phase of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Settled: showing its target
    #[default]
    Idle,
    /// Stepping forward through the wheel
    Cycling,
}

/// Events a cell reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellEvent {
    /// Animate toward a new target from the current symbol
    SetTarget(Token),
    /// Free-run with no target
    StartLoading,
    /// Commit a target while free-running, without resetting the wheel
    StopLoading(Token),
    /// One clock step
    Tick,
}

/// State of one flap wheel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellState {
    position: CellPosition,
    current: Token,
    target: Option<Token>,
    phase: Phase,
}

impl CellState {
    /// A blank, idle cell
    pub fn new(position: CellPosition) -> Self {
        Self::settled(position, Token::BLANK)
    }

    /// An idle cell already showing `token` (first paint)
    pub fn settled(position: CellPosition, token: Token) -> Self {
        Self {
            position,
            current: token,
            target: Some(token),
            phase: Phase::Idle,
        }
    }

    /// Apply one event, returning the next state
    #[must_use]
    pub fn reduce(self, event: CellEvent, alphabet: &Alphabet) -> Self {
        match event {
            CellEvent::StartLoading => Self {
                target: None,
                phase: Phase::Cycling,
                ..self
            },

            // A committed target never resets the wheel; if the wheel
            // already shows it the cell settles on the spot.
            CellEvent::SetTarget(target) | CellEvent::StopLoading(target) => {
                if target == self.current {
                    Self::settled(self.position, target)
                } else {
                    Self {
                        target: Some(target),
                        phase: Phase::Cycling,
                        ..self
                    }
                }
            }

            CellEvent::Tick => self.step(alphabet),
        }
    }

    /// Advance one slot if cycling
    fn step(self, alphabet: &Alphabet) -> Self {
        if self.phase == Phase::Idle {
            return self;
        }

        let current = alphabet.next(self.current);
        match self.target {
            Some(target) if target == current => Self::settled(self.position, target),
            _ => Self { current, ..self },
        }
    }

    pub fn position(&self) -> CellPosition {
        self.position
    }

    /// Token currently on display
    pub fn current(&self) -> Token {
        self.current
    }

    /// Committed target; `None` while free-running
    pub fn target(&self) -> Option<Token> {
        self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_cycling(&self) -> bool {
        self.phase == Phase::Cycling
    }

    /// Whether the cell is free-running with no target
    pub fn is_loading(&self) -> bool {
        self.is_cycling() && self.target.is_none()
    }

    /// Ticks left before the cell settles.
    ///
    /// `Some(0)` when idle, `None` while free-running or if the target is
    /// not on the wheel.
    pub fn ticks_to_settle(&self, alphabet: &Alphabet) -> Option<usize> {
        match (self.phase, self.target) {
            (Phase::Idle, _) => Some(0),
            (Phase::Cycling, Some(target)) => alphabet.distance(self.current, target),
            (Phase::Cycling, None) => None,
        }
    }

    /// Observable attributes of this cell
    pub fn view(&self) -> CellView {
        CellView {
            position: self.position,
            current: self.current,
            target: self.target,
            is_transitioning: self.is_cycling(),
        }
    }
}

/// Observable snapshot of a cell, independent of any render surface
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub position: CellPosition,
    pub current: Token,
    /// `None` while loading
    pub target: Option<Token>,
    pub is_transitioning: bool,
}

impl CellView {
    /// Printed face of the flap on display.
    ///
    /// Color flaps carry no character and read as `' '`. To tell a color
    /// apart from a blank, use [`CellView::current`] or the `{name}` marker
    /// form that [`CellAttributes::current_char`] holds.
    pub fn current_char(&self) -> char {
        self.current.glyph()
    }

    /// Printed face of the committed target (`None` while loading).
    /// Colors read as `' '`, as in [`CellView::current_char`].
    pub fn target_char(&self) -> Option<char> {
        self.target.map(Token::glyph)
    }

    /// Whether the cell is settled on its target
    pub fn is_idle(&self) -> bool {
        !self.is_transitioning
    }
}

/// Flat attribute form of a [`CellView`], as exposed in snapshots
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellAttributes {
    pub row: usize,
    pub col: usize,
    /// Current symbol; color flaps as `{name}`, unlike the printed face
    /// returned by [`CellView::current_char`]
    pub current_char: String,
    /// Target symbol; `None` while loading
    pub target_char: Option<String>,
    pub is_transitioning: bool,
}

impl From<CellView> for CellAttributes {
    fn from(view: CellView) -> Self {
        Self {
            row: view.position.row,
            col: view.position.col,
            current_char: view.current.to_string(),
            target_char: view.target.map(|t| t.to_string()),
            is_transitioning: view.is_transitioning,
        }
    }
}
