//! Flapboard Core - Headless Split-Flap Transition Engine
//!
//! This crate turns a message string into a grid of flap targets and
//! animates every cell toward its target the way a physical split-flap
//! wheel does: forward only, one symbol per tick, never jumping.
//!
//! It knows nothing about terminals, sockets or where messages come from.
//! A surface (the `flapboard-tui` crate, a test, anything else) feeds it a
//! message plus a loading flag and advances it with elapsed time.
//!
//! # Architecture
//!
//! ```text
//!   message ──► Tokenizer ──► Grid (targets)
//!                                 │
//!   is_loading ─────────────┐     │
//!                           ▼     ▼
//!                    ┌──────────────────┐      ┌────────────────┐
//!                    │    FlapEngine    │◄────►│ AnimationClock │
//!                    │ (grid controller)│ tick │  (owned, one)  │
//!                    └────────┬─────────┘      └────────────────┘
//!                             │ reduce(CellEvent)
//!                             ▼
//!                    CellState[rows × cols]
//!                             │
//!                             ▼
//!                    CellView / Tile ──► surface
//! ```
//!
//! # Key Types
//!
//! - [`FlapEngine`]: owns the cells and the clock, reacts to input changes
//! - [`CellState`]: per-cell reducer driven by [`CellEvent`]s
//! - [`AnimationClock`]: the single tick scheduler of an engine
//! - [`Tokenizer`] / [`tokenize`]: message string to target [`Grid`]
//! - [`Alphabet`]: the cyclic wheel every cell steps through
//! - [`Tile`]: what a surface should draw for a cell
//!
//! # Quick Start
//!
//! ```
//! use std::time::Duration;
//! use flapboard_core::FlapEngine;
//!
//! let mut engine = FlapEngine::standard();
//! engine.update(Some("HELLO"), false); // first paint, no animation
//! engine.update(Some("WORLD"), false); // cells start cycling
//!
//! while !engine.is_settled() {
//!     engine.advance(Duration::from_millis(100));
//! }
//! assert_eq!(engine.cell(0, 0).map(|c| c.current_char()), Some('W'));
//! ```

pub mod alphabet;
pub mod cell;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod palette;
pub mod tile;
pub mod token;
pub mod tokenizer;

pub use alphabet::{Alphabet, ALPHABET_SIZE};
pub use cell::{CellAttributes, CellEvent, CellPosition, CellState, CellView, Phase};
pub use clock::{AnimationClock, FULL_CYCLE};
pub use config::{BoardConfig, ConfigError, ConfigSource, GeometryPreset};
pub use engine::{BoardSnapshot, EngineConfig, FlapEngine};
pub use error::EngineError;
pub use grid::{BoardGeometry, Grid};
pub use palette::ColorCode;
pub use tile::{BoardType, Tile, TileSize};
pub use token::Token;
pub use tokenizer::{tokenize, Tokenizer};
