//! Theme and Colors
//!
//! Terminal colors for the split-flap board. Flap faces and ink come from
//! the board finish; swatches come from the shared flap palette so a
//! settled color flap looks the same on any surface.

use ratatui::style::{Color, Modifier, Style};

use flapboard_core::{BoardType, ColorCode};

// ============================================================================
// Chrome
// ============================================================================

/// Housing around the flaps on a black board
pub const HOUSING_DARK: Color = Color::Rgb(8, 8, 8);

/// Housing around the flaps on a white board
pub const HOUSING_LIGHT: Color = Color::Rgb(200, 200, 194);

/// Status line text
pub const STATUS_DIM: Color = Color::Rgb(120, 120, 120);

/// Status line highlight (loading indicator)
pub const STATUS_ACCENT: Color = Color::Rgb(255, 180, 60);

// ============================================================================
// Board colors
// ============================================================================

/// Convert a palette triple to a terminal color
pub const fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Background behind the tiles
pub const fn housing(board: BoardType) -> Color {
    match board {
        BoardType::Black => HOUSING_DARK,
        BoardType::White => HOUSING_LIGHT,
    }
}

/// Style of a flap showing a glyph
pub fn glyph_style(board: BoardType) -> Style {
    Style::default()
        .fg(rgb(board.ink_rgb()))
        .bg(rgb(board.face_rgb()))
        .add_modifier(Modifier::BOLD)
}

/// Style of a settled color flap
pub fn swatch_style(board: BoardType, code: ColorCode) -> Style {
    let color = rgb(board.swatch_rgb(code));
    Style::default().fg(color).bg(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_style_follows_board() {
        let black = glyph_style(BoardType::Black);
        let white = glyph_style(BoardType::White);
        assert_eq!(black.bg, Some(rgb(BoardType::Black.face_rgb())));
        assert_eq!(white.fg, Some(rgb(BoardType::White.ink_rgb())));
        assert_ne!(black.bg, white.bg);
    }

    #[test]
    fn test_filled_swatch_inverts_with_board() {
        let on_black = swatch_style(BoardType::Black, ColorCode::Filled);
        let on_white = swatch_style(BoardType::White, ColorCode::Filled);
        assert_eq!(on_black.bg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(on_white.bg, Some(Color::Rgb(0, 0, 0)));
    }
}
