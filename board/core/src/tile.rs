//! Render adapter, headless half.
//!
//! Maps each cell to what a surface should draw: a character glyph or a
//! solid color swatch. A swatch appears only once a cell has settled on a
//! color token; while a cell is cycling it always shows a glyph.

use serde::{Deserialize, Serialize};

use crate::cell::CellView;
use crate::palette::ColorCode;
use crate::token::Token;

/// Board finish; selects the unlit flap colors only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardType {
    #[default]
    Black,
    White,
}

impl BoardType {
    /// Flap face color (background of a glyph tile)
    pub const fn face_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black => (24, 24, 24),
            Self::White => (238, 238, 232),
        }
    }

    /// Glyph color on a flap face
    pub const fn ink_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Black => (245, 245, 245),
            Self::White => (20, 20, 20),
        }
    }

    /// Resolve a palette entry against this board (`filled` is board-relative)
    pub const fn swatch_rgb(self, code: ColorCode) -> (u8, u8, u8) {
        match (code, self) {
            (ColorCode::Filled, Self::Black) => ColorCode::White.rgb(),
            (ColorCode::Filled, Self::White) => ColorCode::Black.rgb(),
            _ => code.rgb(),
        }
    }

    /// The other finish
    pub fn toggled(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }
}

impl std::str::FromStr for BoardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" => Ok(Self::Black),
            "white" => Ok(Self::White),
            other => Err(format!("unknown board type '{other}' (expected black or white)")),
        }
    }
}

/// Visual scale of a tile; does not affect transitions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl TileSize {
    /// Terminal cells a tile occupies (width, height)
    pub const fn footprint(self) -> (u16, u16) {
        match self {
            Self::Sm => (1, 1),
            Self::Md => (3, 1),
            Self::Lg => (5, 3),
        }
    }

    /// Next size up, wrapping
    pub fn next(self) -> Self {
        match self {
            Self::Sm => Self::Md,
            Self::Md => Self::Lg,
            Self::Lg => Self::Sm,
        }
    }
}

impl std::str::FromStr for TileSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sm" => Ok(Self::Sm),
            "md" => Ok(Self::Md),
            "lg" => Ok(Self::Lg),
            other => Err(format!("unknown tile size '{other}' (expected sm, md or lg)")),
        }
    }
}

/// What to draw for one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// A character on a flap face
    Glyph(char),
    /// A solid color flap
    Swatch(ColorCode),
}

impl Tile {
    /// Tile for a cell's observable state
    pub fn for_cell(view: &CellView) -> Self {
        match view.current {
            Token::Color(code) if !view.is_transitioning => Self::Swatch(code),
            token => Self::Glyph(token.glyph()),
        }
    }

    pub fn is_swatch(self) -> bool {
        matches!(self, Self::Swatch(_))
    }
}
