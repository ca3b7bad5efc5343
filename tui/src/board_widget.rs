//! Board Widget
//!
//! Paints every cell of a [`FlapEngine`] as a tile. A glyph tile is a flap
//! face in the board's colors with its character centered; a swatch tile is
//! a solid block of palette color. The board is centered in the render area
//! and clipped at its edges.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use flapboard_core::{BoardType, FlapEngine, Tile, TileSize};

use crate::theme;

/// Columns/rows left between neighbouring tiles
pub const fn spacing(size: TileSize) -> (u16, u16) {
    match size {
        TileSize::Sm => (0, 0),
        TileSize::Md => (1, 0),
        TileSize::Lg => (1, 1),
    }
}

/// Renders a flap engine's current cells
pub struct BoardWidget<'a> {
    engine: &'a FlapEngine,
    board_type: BoardType,
    size: TileSize,
}

impl<'a> BoardWidget<'a> {
    pub fn new(engine: &'a FlapEngine) -> Self {
        Self {
            engine,
            board_type: BoardType::default(),
            size: TileSize::default(),
        }
    }

    pub fn board_type(mut self, board_type: BoardType) -> Self {
        self.board_type = board_type;
        self
    }

    pub fn size(mut self, size: TileSize) -> Self {
        self.size = size;
        self
    }

    /// Terminal cells the whole board needs (width, height)
    pub fn required_size(&self) -> (u16, u16) {
        let geometry = self.engine.geometry();
        let (tile_w, tile_h) = self.size.footprint();
        let (gap_x, gap_y) = spacing(self.size);
        let cols = geometry.cols() as u16;
        let rows = geometry.rows() as u16;
        (
            cols * tile_w + cols.saturating_sub(1) * gap_x,
            rows * tile_h + rows.saturating_sub(1) * gap_y,
        )
    }

    /// Top-left corner of the tile at (row, col), relative to the board
    fn tile_origin(&self, row: usize, col: usize) -> (u16, u16) {
        let (tile_w, tile_h) = self.size.footprint();
        let (gap_x, gap_y) = spacing(self.size);
        (
            col as u16 * (tile_w + gap_x),
            row as u16 * (tile_h + gap_y),
        )
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(theme::housing(self.board_type)));

        let (board_w, board_h) = self.required_size();
        let x_offset = area.width.saturating_sub(board_w) / 2;
        let y_offset = area.height.saturating_sub(board_h) / 2;
        let (tile_w, tile_h) = self.size.footprint();

        for view in self.engine.cells() {
            let (dx, dy) = self.tile_origin(view.position.row, view.position.col);
            let x = area.x + x_offset + dx;
            let y = area.y + y_offset + dy;
            if x >= area.right() || y >= area.bottom() {
                continue;
            }

            let tile_area = Rect::new(x, y, tile_w, tile_h).intersection(area);
            match Tile::for_cell(&view) {
                Tile::Glyph(glyph) => {
                    let style = theme::glyph_style(self.board_type);
                    buf.set_style(tile_area, style);

                    // Character sits in the middle of the flap
                    let gx = x + tile_w / 2;
                    let gy = y + tile_h / 2;
                    if gx < area.right() && gy < area.bottom() {
                        buf.set_string(gx, gy, glyph.to_string(), style);
                    }
                }
                Tile::Swatch(code) => {
                    let style = theme::swatch_style(self.board_type, code);
                    for ty in tile_area.top()..tile_area.bottom() {
                        for tx in tile_area.left()..tile_area.right() {
                            buf.set_string(tx, ty, " ", style);
                        }
                    }
                }
            }
        }
    }
}
