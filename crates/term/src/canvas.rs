//! BoardCanvas: a [`Surface`] over a rectangle of the framebuffer.
//!
//! One surface unit is one board cell, drawn as `cell_w × cell_h` characters.
//! A rectangle fills every character whose centre lies inside it, so a tile
//! sliding by half a cell moves by one column. Rectangles smaller than a
//! character (particles) are plotted as a single dot at their centre.

use crate::core::Surface;
use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

pub const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_DOT: Rgb = Rgb::new(90, 90, 100);

/// Board-sized drawing region inside a framebuffer
pub struct BoardCanvas<'a> {
    fb: &'a mut FrameBuffer,
    /// Top-left character of the board area
    origin: (u16, u16),
    /// Board size in cells
    cells: (u16, u16),
    cell_w: u16,
    cell_h: u16,
}

impl<'a> BoardCanvas<'a> {
    pub fn new(
        fb: &'a mut FrameBuffer,
        origin: (u16, u16),
        cells: (u16, u16),
        cell_w: u16,
        cell_h: u16,
    ) -> Self {
        Self {
            fb,
            origin,
            cells,
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn cols(&self) -> u16 {
        self.cells.0 * self.cell_w
    }

    fn rows(&self) -> u16 {
        self.cells.1 * self.cell_h
    }

    /// Plot one character at board-area character coordinates, clipped to the board.
    fn plot(&mut self, col: i32, row: i32, ch: char, colour: Rgb) {
        if col < 0 || row < 0 || col >= self.cols() as i32 || row >= self.rows() as i32 {
            return;
        }
        let style = CellStyle::new(colour, BOARD_BG);
        self.fb.put_char(
            self.origin.0 + col as u16,
            self.origin.1 + row as u16,
            ch,
            style,
        );
    }
}

impl Surface for BoardCanvas<'_> {
    fn clear(&mut self) {
        let dot = CellStyle::new(GRID_DOT, BOARD_BG).dim();
        let blank = CellStyle::new(GRID_DOT, BOARD_BG);
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let on_dot = col % self.cell_w == 0 && row % self.cell_h == 0;
                let (ch, style) = if on_dot { ('·', dot) } else { (' ', blank) };
                self.fb
                    .put_char(self.origin.0 + col, self.origin.1 + row, ch, style);
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, colour: Rgb) {
        let sx = self.cell_w as f32;
        let sy = self.cell_h as f32;

        if w * sx < 1.0 && h * sy < 1.0 {
            let col = ((x + w / 2.0) * sx).floor() as i32;
            let row = ((y + h / 2.0) * sy).floor() as i32;
            self.plot(col, row, '•', colour);
            return;
        }

        // Characters with centre c + 0.5 inside [x*s, (x+w)*s).
        let first_col = (x * sx - 0.5).ceil() as i32;
        let end_col = ((x + w) * sx - 0.5).ceil() as i32;
        let first_row = (y * sy - 0.5).ceil() as i32;
        let end_row = ((y + h) * sy - 0.5).ceil() as i32;
        for row in first_row..end_row {
            for col in first_col..end_col {
                self.plot(col, row, '█', colour);
            }
        }
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, colour: Rgb) {
        let len = text.chars().count() as i32;
        let col = (x * self.cell_w as f32).round() as i32 - len / 2;
        let row = (y * self.cell_h as f32).floor() as i32;
        let style = CellStyle::new(colour, Rgb::new(0, 0, 0)).bold();
        for (i, ch) in text.chars().enumerate() {
            let c = col + i as i32;
            if c >= 0 && c < self.cols() as i32 && row >= 0 && row < self.rows() as i32 {
                self.fb
                    .put_char(self.origin.0 + c as u16, self.origin.1 + row as u16, ch, style);
            }
        }
    }

    fn size(&self) -> (f32, f32) {
        (self.cells.0 as f32, self.cells.1 as f32)
    }
}
