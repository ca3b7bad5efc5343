//! Flap Wheel Alphabet
//!
//! The ordered, cyclic sequence of symbols printed on every wheel. A wheel
//! can only advance to the next slot (wrapping from the last slot back to
//! the first), so the order here decides how many ticks any transition takes.
//!
//! # Standard order
//!
//! ```text
//! slot  0       blank
//! slots 1-26    A-Z
//! slots 27-36   1 2 3 4 5 6 7 8 9 0
//! slots 37-61   ! @ # $ ( ) - + & = ; : ' " % , . / ? ° { } [ ] *
//! slots 62-70   color flaps, palette id order (red .. filled)
//! ```

use std::collections::HashMap;

use crate::error::EngineError;
use crate::palette::ColorCode;
use crate::token::Token;

/// Number of slots on the standard wheel
pub const ALPHABET_SIZE: usize = 71;

/// Character slots of the standard wheel, in order
const STANDARD_CHARS: &str = " ABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890!@#$()-+&=;:'\"%,./?°{}[]*";

/// An ordered cyclic wheel of tokens
#[derive(Clone, Debug)]
pub struct Alphabet {
    slots: Vec<Token>,
    index: HashMap<Token, usize>,
}

impl Alphabet {
    /// Build a wheel from an explicit slot order.
    ///
    /// Rejects an empty sequence and repeated symbols; either would break
    /// the forward-only convergence guarantee.
    pub fn new(slots: Vec<Token>) -> Result<Self, EngineError> {
        if slots.is_empty() {
            return Err(EngineError::InvalidAlphabet("alphabet is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(slots.len());
        for (i, token) in slots.iter().enumerate() {
            if index.insert(*token, i).is_some() {
                return Err(EngineError::InvalidAlphabet(format!(
                    "symbol {token:?} appears more than once"
                )));
            }
        }

        Ok(Self { slots, index })
    }

    /// The standard 71-slot wheel
    pub fn standard() -> Self {
        let slots: Vec<Token> = STANDARD_CHARS
            .chars()
            .map(Token::Char)
            .chain(ColorCode::ALL.into_iter().map(Token::Color))
            .collect();
        debug_assert_eq!(slots.len(), ALPHABET_SIZE);

        let index = slots.iter().enumerate().map(|(i, t)| (*t, i)).collect();
        Self { slots, index }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false; construction rejects empty wheels
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot index of a token, if it is on the wheel
    pub fn index_of(&self, token: Token) -> Option<usize> {
        self.index.get(&token).copied()
    }

    /// Whether a token can be reached by cycling
    pub fn contains(&self, token: Token) -> bool {
        self.index.contains_key(&token)
    }

    /// Token at a slot (wrapping)
    pub fn at(&self, slot: usize) -> Token {
        self.slots[slot % self.slots.len()]
    }

    /// The token one slot forward.
    ///
    /// A token that is not on the wheel advances to slot 0.
    pub fn next(&self, token: Token) -> Token {
        match self.index_of(token) {
            Some(i) => self.at(i + 1),
            None => self.slots[0],
        }
    }

    /// Forward steps needed to go from `from` to `to` (0 when equal).
    ///
    /// Returns `None` if `to` is not on the wheel.
    pub fn distance(&self, from: Token, to: Token) -> Option<usize> {
        let target = self.index_of(to)?;
        if from == to {
            return Some(0);
        }
        let len = self.slots.len();
        match self.index_of(from) {
            Some(start) => Some((target + len - start) % len),
            // Off-wheel tokens first step onto slot 0
            None => Some(target + 1),
        }
    }

    /// Iterate the slots in wheel order
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.slots.iter().copied()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::standard()
    }
}
