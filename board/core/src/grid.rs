//! Board geometry and target grids.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::token::Token;

/// Rows × columns of a board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardGeometry {
    rows: usize,
    cols: usize,
}

impl BoardGeometry {
    /// Full-size board: 6 rows of 22 flaps
    pub const FLAGSHIP: BoardGeometry = BoardGeometry { rows: 6, cols: 22 };

    /// Desk-size board: 3 rows of 15 flaps
    pub const NOTE: BoardGeometry = BoardGeometry { rows: 3, cols: 15 };

    /// Create a geometry, rejecting zero dimensions
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidGeometry { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major index of a cell, if in bounds
    pub fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self::FLAGSHIP
    }
}

/// A full board of target tokens, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    geometry: BoardGeometry,
    tokens: Vec<Token>,
}

impl Grid {
    /// An all-blank grid
    pub fn blank(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            tokens: vec![Token::BLANK; geometry.cell_count()],
        }
    }

    /// Build from complete rows.
    ///
    /// Callers guarantee each row has exactly `cols` tokens; the tokenizer
    /// is the only producer.
    pub(crate) fn from_rows(geometry: BoardGeometry, rows: Vec<Vec<Token>>) -> Self {
        let mut tokens = Vec::with_capacity(geometry.cell_count());
        for row in rows {
            debug_assert_eq!(row.len(), geometry.cols());
            tokens.extend(row);
        }
        debug_assert_eq!(tokens.len(), geometry.cell_count());
        Self { geometry, tokens }
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Token at a cell
    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        self.geometry.index_of(row, col).map(|i| self.tokens[i])
    }

    /// One row of tokens
    pub fn row(&self, row: usize) -> Option<&[Token]> {
        if row >= self.geometry.rows() {
            return None;
        }
        let cols = self.geometry.cols();
        Some(&self.tokens[row * cols..(row + 1) * cols])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Token]> {
        self.tokens.chunks(self.geometry.cols())
    }

    /// All tokens, row-major
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Render rows back to text (color tokens as `{name}` markers)
    pub fn to_text(&self) -> String {
        self.rows()
            .map(|row| row.iter().map(|t| t.to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(BoardGeometry::FLAGSHIP.cell_count(), 132);
        assert_eq!(BoardGeometry::NOTE.cell_count(), 45);
        assert_eq!(BoardGeometry::default(), BoardGeometry::FLAGSHIP);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            BoardGeometry::new(0, 22),
            Err(EngineError::InvalidGeometry { rows: 0, cols: 22 })
        );
        assert!(BoardGeometry::new(6, 0).is_err());
        assert!(BoardGeometry::new(1, 1).is_ok());
    }

    #[test]
    fn test_index_bounds() {
        let g = BoardGeometry::FLAGSHIP;
        assert_eq!(g.index_of(0, 0), Some(0));
        assert_eq!(g.index_of(1, 0), Some(22));
        assert_eq!(g.index_of(5, 21), Some(131));
        assert_eq!(g.index_of(6, 0), None);
        assert_eq!(g.index_of(0, 22), None);
    }

    #[test]
    fn test_blank_grid() {
        let grid = Grid::blank(BoardGeometry::NOTE);
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|r| r.len() == 15));
        assert!(grid.tokens().iter().all(|t| t.is_blank()));
        assert_eq!(grid.get(3, 0), None);
        assert!(grid.row(3).is_none());
    }
}
