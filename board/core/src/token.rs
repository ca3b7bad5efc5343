//! Flap tokens - what a single cell can show.

use serde::{Deserialize, Serialize};

use crate::palette::ColorCode;

/// A symbol on a flap wheel: a character or a solid color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Char(char),
    Color(ColorCode),
}

impl Token {
    /// The blank flap
    pub const BLANK: Token = Token::Char(' ');

    /// Glyph shown for this token while it is on display as a character.
    ///
    /// Color tokens have no glyph of their own; mid-cycle they show as the
    /// blank flap. The solid swatch is a render decision (see [`crate::tile`]).
    pub fn glyph(self) -> char {
        match self {
            Self::Char(c) => c,
            Self::Color(_) => ' ',
        }
    }

    /// Whether this is a color token
    pub fn is_color(self) -> bool {
        matches!(self, Self::Color(_))
    }

    /// Whether this is the blank flap
    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::BLANK
    }
}

impl From<char> for Token {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<ColorCode> for Token {
    fn from(code: ColorCode) -> Self {
        Self::Color(code)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Color(code) => write!(f, "{code}"),
        }
    }
}
