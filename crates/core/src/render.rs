//! Render target abstraction.
//!
//! The engine draws through a minimal "clear + rectangle + text" surface. It
//! never knows whether the surface is a terminal framebuffer or a pixel canvas.
//! All coordinates are in surface units; tiles scale board cells by `cell_size`.

use crate::types::Rgb;

/// Canvas-like drawing capability consumed by the engine.
pub trait Surface {
    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, colour: Rgb);

    /// Draw a line of text centred horizontally on `x`, top edge at `y`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, colour: Rgb);

    /// Surface extent in surface units, used to centre overlays.
    fn size(&self) -> (f32, f32);
}

/// Cosmetic switches for tile rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Draw connecting bars between neighbouring sub-cells of the same tile.
    pub joints: bool,
    /// Gap left around each cell, as a fraction of the cell size.
    pub inset: f32,
    /// Width of a joint bar, as a fraction of the cell size.
    pub joint_size: f32,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            joints: true,
            inset: 0.1,
            joint_size: 0.4,
        }
    }
}

/// Records every draw call; handy for asserting what a frame produced.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub clears: usize,
    pub rects: Vec<(f32, f32, f32, f32, Rgb)>,
    pub texts: Vec<(f32, f32, String)>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, _, t)| t == needle)
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.rects.clear();
        self.texts.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, colour: Rgb) {
        self.rects.push((x, y, w, h, colour));
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, _colour: Rgb) {
        self.texts.push((x, y, text.to_string()));
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
