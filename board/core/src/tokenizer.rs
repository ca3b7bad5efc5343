//! Grid Tokenizer
//!
//! Maps a message string to a fixed grid of target tokens.
//!
//! # Rules
//!
//! - Lines are split on `\n` (a trailing `\r` is ignored); at most `rows`
//!   lines are used and missing lines are blank.
//! - `{code}` where `code` is a palette id or name becomes one color cell,
//!   provided the wheel carries that color. Anything else, unknown markers
//!   included, is one character cell per character.
//! - Characters are normalized onto the wheel: lowercase ASCII is
//!   upper-cased, anything else the wheel cannot show becomes blank.
//! - Short lines are padded with blanks, long lines truncated.
//!
//! Tokenizing is pure: the same message always yields the same grid.

use crate::alphabet::Alphabet;
use crate::grid::{BoardGeometry, Grid};
use crate::palette::ColorCode;
use crate::token::Token;

/// Tokenize a message onto the standard 6×22 board
pub fn tokenize(message: Option<&str>) -> Grid {
    Tokenizer::new(BoardGeometry::FLAGSHIP).tokenize(message)
}

/// Message tokenizer for a given board geometry
#[derive(Clone, Debug)]
pub struct Tokenizer {
    geometry: BoardGeometry,
    alphabet: Alphabet,
}

impl Tokenizer {
    /// Tokenizer over the standard wheel
    pub fn new(geometry: BoardGeometry) -> Self {
        Self::with_alphabet(geometry, Alphabet::standard())
    }

    /// Tokenizer normalizing characters onto a custom wheel
    pub fn with_alphabet(geometry: BoardGeometry, alphabet: Alphabet) -> Self {
        Self { geometry, alphabet }
    }

    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Tokenize a message. `None` yields an all-blank grid.
    pub fn tokenize(&self, message: Option<&str>) -> Grid {
        let Some(message) = message else {
            return Grid::blank(self.geometry);
        };

        let mut lines = message.split('\n');
        let rows = (0..self.geometry.rows())
            .map(|_| match lines.next() {
                Some(line) => self.tokenize_line(line.strip_suffix('\r').unwrap_or(line)),
                None => vec![Token::BLANK; self.geometry.cols()],
            })
            .collect();

        Grid::from_rows(self.geometry, rows)
    }

    /// Tokenize one line into exactly `cols` tokens
    fn tokenize_line(&self, line: &str) -> Vec<Token> {
        let cols = self.geometry.cols();
        let chars: Vec<char> = line.chars().collect();
        let mut tokens = Vec::with_capacity(cols);
        let mut i = 0;

        while i < chars.len() && tokens.len() < cols {
            if chars[i] == '{' {
                // A color the wheel cannot reach reads as literal text
                let marker = Self::color_marker(&chars[i..])
                    .filter(|&(code, _)| self.alphabet.contains(Token::Color(code)));
                if let Some((code, consumed)) = marker {
                    tokens.push(Token::Color(code));
                    i += consumed;
                    continue;
                }
            }

            tokens.push(self.normalize(chars[i]));
            i += 1;
        }

        tokens.resize(cols, Token::BLANK);
        tokens
    }

    /// Parse a `{code}` marker at the start of `chars`.
    ///
    /// Returns the color and the number of characters consumed.
    fn color_marker(chars: &[char]) -> Option<(ColorCode, usize)> {
        let close = chars.iter().position(|&c| c == '}')?;
        let code: String = chars[1..close].iter().collect();
        ColorCode::parse_marker(&code).map(|color| (color, close + 1))
    }

    /// Map a character onto the wheel
    fn normalize(&self, c: char) -> Token {
        let token = Token::Char(c);
        if self.alphabet.contains(token) {
            return token;
        }

        let upper = Token::Char(c.to_ascii_uppercase());
        if self.alphabet.contains(upper) {
            return upper;
        }

        Token::BLANK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row_text(grid: &Grid, row: usize) -> String {
        grid.row(row)
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect()
    }

    #[test]
    fn test_none_is_blank() {
        let grid = tokenize(None);
        assert_eq!(grid, Grid::blank(BoardGeometry::FLAGSHIP));
    }

    #[test]
    fn test_pads_short_lines() {
        let grid = tokenize(Some("HI"));
        assert_eq!(grid.get(0, 0), Some(Token::Char('H')));
        assert_eq!(grid.get(0, 1), Some(Token::Char('I')));
        assert_eq!(grid.get(0, 2), Some(Token::BLANK));
        assert_eq!(grid.get(0, 21), Some(Token::BLANK));
    }

    #[test]
    fn test_missing_rows_are_blank() {
        let grid = tokenize(Some("ONE\nTWO"));
        assert_eq!(row_text(&grid, 1).trim_end(), "TWO");
        for row in 2..6 {
            assert!(grid.row(row).unwrap().iter().all(|t| t.is_blank()));
        }
    }

    #[test]
    fn test_truncates_long_lines() {
        let grid = tokenize(Some("ABCDEFGHIJKLMNOPQRSTUVWXYZ"));
        assert_eq!(row_text(&grid, 0), "ABCDEFGHIJKLMNOPQRSTUV");
    }

    #[test]
    fn test_extra_lines_dropped() {
        let grid = tokenize(Some("1\n2\n3\n4\n5\n6\n7\n8"));
        assert_eq!(grid.rows().count(), 6);
        assert_eq!(grid.get(5, 0), Some(Token::Char('6')));
    }

    #[test]
    fn test_crlf_lines() {
        let grid = tokenize(Some("AB\r\nCD"));
        assert_eq!(row_text(&grid, 0).trim_end(), "AB");
        assert_eq!(row_text(&grid, 1).trim_end(), "CD");
    }

    #[test]
    fn test_color_markers_take_one_cell() {
        let grid = tokenize(Some("{blue}X{63}"));
        assert_eq!(grid.get(0, 0), Some(Token::Color(ColorCode::Blue)));
        assert_eq!(grid.get(0, 1), Some(Token::Char('X')));
        assert_eq!(grid.get(0, 2), Some(Token::Color(ColorCode::Red)));
        assert_eq!(grid.get(0, 3), Some(Token::BLANK));
    }

    #[test]
    fn test_unknown_marker_is_literal() {
        let grid = tokenize(Some("{NOPE}"));
        assert_eq!(row_text(&grid, 0).trim_end(), "{NOPE}");
    }

    #[test]
    fn test_unterminated_marker_is_literal() {
        let grid = tokenize(Some("{RED"));
        assert_eq!(row_text(&grid, 0).trim_end(), "{RED");
    }

    #[test]
    fn test_nested_brace_recovers_marker() {
        let grid = tokenize(Some("{{green}"));
        assert_eq!(grid.get(0, 0), Some(Token::Char('{')));
        assert_eq!(grid.get(0, 1), Some(Token::Color(ColorCode::Green)));
    }

    #[test]
    fn test_marker_without_color_slot_is_literal() {
        let alphabet = Alphabet::new(" ABCXYZ".chars().map(Token::Char).collect()).unwrap();
        let tokenizer = Tokenizer::with_alphabet(BoardGeometry::new(1, 8).unwrap(), alphabet);
        let grid = tokenizer.tokenize(Some("{blue}A"));

        assert_eq!(row_text(&grid, 0), " B    A ");
        assert!(grid
            .row(0)
            .unwrap()
            .iter()
            .all(|t| matches!(t, Token::Char(_))));
    }

    #[test]
    fn test_markers_count_toward_width() {
        let message = "{red}".repeat(30);
        let grid = tokenize(Some(&message));
        assert!(grid
            .row(0)
            .unwrap()
            .iter()
            .all(|t| *t == Token::Color(ColorCode::Red)));
    }

    #[test]
    fn test_normalizes_case_and_unsupported() {
        let grid = tokenize(Some("hi~\t°"));
        assert_eq!(row_text(&grid, 0).trim_end(), "HI  °");
    }

    #[test]
    fn test_note_geometry() {
        let tokenizer = Tokenizer::new(BoardGeometry::NOTE);
        let grid = tokenizer.tokenize(Some("A\nB\nC\nD"));
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|r| r.len() == 15));
        assert_eq!(grid.get(2, 0), Some(Token::Char('C')));
    }

    #[test]
    fn test_is_deterministic() {
        let message = Some("{blue}HELLO\nWORLD {nope}");
        assert_eq!(tokenize(message), tokenize(message));
    }
}
