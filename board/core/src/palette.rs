//! Color Palette
//!
//! The solid color flaps a board can show. Each entry is addressable in a
//! message by its numeric id (`{66}`) or its name (`{green}`).

use serde::{Deserialize, Serialize};

/// A palette entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCode {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    White,
    Black,
    /// Lit flap: white on a black board, black on a white board
    Filled,
}

impl ColorCode {
    /// All palette entries in id order
    pub const ALL: [ColorCode; 9] = [
        ColorCode::Red,
        ColorCode::Orange,
        ColorCode::Yellow,
        ColorCode::Green,
        ColorCode::Blue,
        ColorCode::Violet,
        ColorCode::White,
        ColorCode::Black,
        ColorCode::Filled,
    ];

    /// Numeric id used in `{id}` markers
    pub const fn id(self) -> u8 {
        match self {
            Self::Red => 63,
            Self::Orange => 64,
            Self::Yellow => 65,
            Self::Green => 66,
            Self::Blue => 67,
            Self::Violet => 68,
            Self::White => 69,
            Self::Black => 70,
            Self::Filled => 71,
        }
    }

    /// Canonical name used in `{name}` markers
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::White => "white",
            Self::Black => "black",
            Self::Filled => "filled",
        }
    }

    /// Look up a palette entry by numeric id
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Parse the inside of a `{...}` marker.
    ///
    /// Accepts a numeric id or a name (case-insensitive, surrounding
    /// whitespace ignored). `purple` is accepted as an alias of violet.
    pub fn parse_marker(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }

        if code.bytes().all(|b| b.is_ascii_digit()) {
            return code.parse::<u8>().ok().and_then(Self::from_id);
        }

        let lower = code.to_ascii_lowercase();
        if lower == "purple" {
            return Some(Self::Violet);
        }
        Self::ALL.into_iter().find(|c| c.name() == lower)
    }

    /// RGB value of the flap face
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (218, 41, 28),
            Self::Orange => (255, 117, 0),
            Self::Yellow => (255, 184, 28),
            Self::Green => (0, 154, 68),
            Self::Blue => (0, 133, 202),
            Self::Violet => (112, 47, 138),
            Self::White => (255, 255, 255),
            Self::Black => (0, 0, 0),
            // Resolved against the board type before painting
            Self::Filled => (255, 255, 255),
        }
    }
}

impl std::fmt::Display for ColorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}
