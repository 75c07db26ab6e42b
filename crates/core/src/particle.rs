//! Particle effects - cosmetic debris emitted by line clears
//!
//! Particles live in board-cell units and never feed back into game state.

use crate::grid::Grid;
use crate::render::Surface;
use crate::rng::SimpleRng;
use crate::types::Rgb;

/// Downward acceleration in cells/s²
const GRAVITY: f32 = 12.0;
/// Horizontal launch speed range is [-MAX_VX, MAX_VX) cells/s
const MAX_VX: f32 = 8.0;
/// Vertical launch speed is (r - 0.7) * VY_SCALE cells/s, mostly upwards
const VY_SCALE: f32 = 16.0;
/// How far off the board a particle may drift before it is dropped
const MARGIN: f32 = 4.0;
/// Edge length of a drawn particle, in cells
const SIZE: f32 = 0.15;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub colour: Rgb,
    pub finished: bool,
}

impl Particle {
    pub fn new(x: f32, y: f32, colour: Rgb, rng: &mut SimpleRng) -> Self {
        Self {
            x,
            y,
            vx: (rng.next_f32() - 0.5) * 2.0 * MAX_VX,
            vy: (rng.next_f32() - 0.7) * VY_SCALE,
            colour,
            finished: false,
        }
    }

    /// Integrate `dt_ms` of motion and flag the particle once it leaves the play area.
    pub fn tick(&mut self, dt_ms: u32, grid: Grid) {
        let dt = dt_ms as f32 / 1000.0;
        self.vy += GRAVITY * dt;
        self.x += self.vx * dt;
        self.y += self.vy * dt;

        if self.y > grid.height as f32 + MARGIN
            || self.x < -MARGIN
            || self.x > grid.width as f32 + MARGIN
        {
            self.finished = true;
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, cell_size: f32) {
        surface.fill_rect(
            self.x * cell_size,
            self.y * cell_size,
            SIZE * cell_size,
            SIZE * cell_size,
            self.colour,
        );
    }
}

/// All live particles.
#[derive(Debug, Clone, Default)]
pub struct Particles {
    items: Vec<Particle>,
}

impl Particles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `count` particles from the centre of board cell (x, y).
    pub fn burst(&mut self, x: i32, y: i32, colour: Rgb, count: usize, rng: &mut SimpleRng) {
        for _ in 0..count {
            self.items
                .push(Particle::new(x as f32 + 0.5, y as f32 + 0.5, colour, rng));
        }
    }

    pub fn tick(&mut self, dt_ms: u32, grid: Grid) {
        for p in self.items.iter_mut() {
            p.tick(dt_ms, grid);
        }
        self.items.retain(|p| !p.finished);
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, cell_size: f32) {
        for p in &self.items {
            p.render(surface, cell_size);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
