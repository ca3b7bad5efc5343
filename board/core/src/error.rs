//! Engine construction errors.
//!
//! The engine itself is total over message input; the only failures are
//! misconfigurations caught when an engine is built.

use thiserror::Error;

/// Errors raised while building an engine, alphabet or geometry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Board has a zero dimension
    #[error("Invalid board geometry {rows}x{cols}: rows and cols must be positive")]
    InvalidGeometry {
        /// Requested row count
        rows: usize,
        /// Requested column count
        cols: usize,
    },

    /// Alphabet is empty or repeats a symbol
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// Full wheel rotation duration is zero
    #[error("Invalid animation cycle: full cycle duration must be positive")]
    InvalidCycle,
}
