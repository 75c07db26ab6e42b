//! Game session - owns the board contents and applies the game rules
//!
//! A session holds the settled tiles, the active tile, the lookahead buffer,
//! the score and every running animation and particle. Timing lives in
//! [`GameLoop`](crate::game_loop::GameLoop); the session only reacts to
//! actions and to explicit gravity steps.
//!
//! # Lifecycle
//!
//! ```text
//! NotStarted --start--> Playing <--pause/resume--> Paused
//!                          |
//!                    spawn collides
//!                          v
//!                      GameOver --start--> Playing
//! ```

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::animation::PropertyStore;
use crate::config::GameConfig;
use crate::grid::{Grid, Point};
use crate::line_clear::{clear_lines, MAX_ROWS_PER_CLEAR};
use crate::particle::Particles;
use crate::pieces::get_colour;
use crate::render::{DrawOptions, Surface};
use crate::rng::{random_kind, SimpleRng};
use crate::scoring::{calculate_line_score, gravity_interval_ms, level_for_lines, Score};
use crate::shape::Shape;
use crate::tile::{DrawTarget, Tile, TileAnimations, TileId, TileIds};
use crate::types::{GameAction, Rgb, TileKind, PARTICLES_PER_CELL};

const OVERLAY_COLOUR: Rgb = Rgb::new(255, 255, 255);
/// Mixed into the seed for the particle RNG
const PARTICLE_SEED_SALT: u32 = 0x9e37_79b9;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

/// What happened when the last tile settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettleEvent {
    /// Rows removed, ascending
    pub rows: ArrayVec<i32, MAX_ROWS_PER_CLEAR>,
    /// Points awarded for the clear
    pub points: u32,
    /// False when the next tile could not spawn
    pub spawned: bool,
}

/// Animation view over the active tile and the settled tiles.
struct SessionTiles<'a> {
    active: Option<&'a mut Tile>,
    settled: &'a mut [Tile],
}

impl PropertyStore<DrawTarget> for SessionTiles<'_> {
    fn property_mut(&mut self, target: &DrawTarget) -> Option<&mut f32> {
        if let Some(active) = self.active.as_deref_mut() {
            if active.id() == target.tile {
                return Some(active.draw_value_mut(target.axis));
            }
        }
        self.settled.property_mut(target)
    }
}

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    tiles: Vec<Tile>,
    active: Option<Tile>,
    buffer: VecDeque<Tile>,
    score: Score,
    lines: u32,
    level: u32,
    state: SessionState,
    animations: TileAnimations,
    particles: Particles,
    rng: SimpleRng,
    /// Separate stream so particle bursts never shift the tile sequence
    particle_rng: SimpleRng,
    ids: TileIds,
    last_event: Option<SettleEvent>,
}

impl GameSession {
    /// Create a session on the standard 10×20 grid
    pub fn new(config: GameConfig) -> Self {
        Self::with_grid(config, Grid::default())
    }

    pub fn with_grid(config: GameConfig, grid: Grid) -> Self {
        let rng = SimpleRng::new(config.seed);
        let particle_rng = SimpleRng::new(config.seed ^ PARTICLE_SEED_SALT);
        Self {
            config,
            grid,
            tiles: Vec::new(),
            active: None,
            buffer: VecDeque::new(),
            score: Score::default(),
            lines: 0,
            level: 0,
            state: SessionState::NotStarted,
            animations: TileAnimations::new(),
            particles: Particles::new(),
            rng,
            particle_rng,
            ids: TileIds::new(),
            last_event: None,
        }
    }

    /// Begin a fresh game, discarding everything from the previous one.
    ///
    /// Tiles, animations and tile ids are rebuilt together, so no animation
    /// from the old game can resolve against a new tile. The tile RNG carries
    /// on; the particle RNG is reseeded.
    pub fn start(&mut self) {
        self.tiles.clear();
        self.active = None;
        self.buffer.clear();
        self.animations.clear();
        self.particles.clear();
        self.particle_rng = SimpleRng::new(self.config.seed ^ PARTICLE_SEED_SALT);
        self.ids = TileIds::new();
        self.score = Score::default();
        self.lines = 0;
        self.level = 0;
        self.last_event = None;
        self.state = SessionState::Playing;

        self.refill_buffer();
        log::info!("session started, seed state {}", self.rng.state());
        self.spawn_next();
    }

    fn new_tile(&mut self, kind: TileKind) -> Tile {
        Tile::new(self.ids.next_id(), kind, self.grid)
    }

    fn refill_buffer(&mut self) {
        while self.buffer.len() < self.config.preview.max(1) {
            let kind = random_kind(&mut self.rng);
            let tile = self.new_tile(kind);
            self.buffer.push_back(tile);
        }
    }

    /// Make the head of the buffer the active tile.
    ///
    /// Returns false, and ends the game, if it collides on arrival.
    pub fn spawn_next(&mut self) -> bool {
        self.refill_buffer();
        let Some(tile) = self.buffer.pop_front() else {
            return false;
        };
        self.refill_buffer();
        self.activate(tile)
    }

    /// Replace the active tile with a fresh tile of `kind` at the spawn position.
    pub fn spawn_kind(&mut self, kind: TileKind) -> bool {
        let tile = self.new_tile(kind);
        self.activate(tile)
    }

    fn activate(&mut self, tile: Tile) -> bool {
        if let Some(old) = self.active.take() {
            let id = old.id();
            self.animations.cancel(|t| t.tile == id);
        }
        if !tile.fits(&self.tiles, self.grid) {
            log::info!(
                "{:?} cannot spawn, game over with {} points",
                tile.kind(),
                self.score.points()
            );
            self.state = SessionState::GameOver;
            return false;
        }
        log::debug!("spawned {:?} as {:?}", tile.kind(), tile.id());
        self.active = Some(tile);
        true
    }

    /// Add a settled tile directly, bypassing the active tile.
    ///
    /// Used to set up boards; the caller keeps the no-overlap invariant.
    pub fn insert_settled(&mut self, kind: TileKind, shape: Shape, pos: Point) -> TileId {
        let id = self.ids.next_id();
        self.tiles
            .push(Tile::from_parts(id, kind, shape, get_colour(kind), pos));
        id
    }

    /// Apply one action. Returns true if it changed anything.
    ///
    /// Everything except [`GameAction::StartOrPause`] is ignored unless playing.
    pub fn apply(&mut self, action: GameAction) -> bool {
        if action == GameAction::StartOrPause {
            match self.state {
                SessionState::NotStarted | SessionState::GameOver => self.start(),
                SessionState::Playing => {
                    log::debug!("paused");
                    self.state = SessionState::Paused;
                }
                SessionState::Paused => {
                    log::debug!("resumed");
                    self.state = SessionState::Playing;
                }
            }
            return true;
        }

        if self.state != SessionState::Playing {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.with_active(|t, settled, grid, anims| {
                t.move_left(settled, grid, anims)
            }),
            GameAction::MoveRight => self.with_active(|t, settled, grid, anims| {
                t.move_right(settled, grid, anims)
            }),
            GameAction::Rotate => {
                self.with_active(|t, settled, grid, _| t.rotate(settled, grid))
            }
            GameAction::SoftDrop => self.step_down(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::StartOrPause => false,
        }
    }

    fn with_active(
        &mut self,
        f: impl FnOnce(&mut Tile, &[Tile], Grid, &mut TileAnimations) -> bool,
    ) -> bool {
        match self.active.as_mut() {
            Some(tile) => f(tile, &self.tiles, self.grid, &mut self.animations),
            None => false,
        }
    }

    /// Move the active tile down one row, settling it if it is blocked.
    ///
    /// Shared by gravity and soft drop. Returns true if the tile moved.
    pub fn step_down(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        if self.with_active(|t, settled, grid, anims| t.move_down(settled, grid, anims)) {
            return true;
        }
        if self.active.is_some() {
            self.settle();
        }
        false
    }

    /// Drop the active tile to its landing row and settle it.
    pub fn hard_drop(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        let Some(tile) = self.active.as_mut() else {
            return false;
        };
        let rows = tile.hard_drop(&self.tiles, self.grid, &mut self.animations);
        log::debug!("hard drop {} rows", rows);
        self.settle();
        true
    }

    /// Commit the active tile to the settled set, clear lines and spawn the next tile.
    fn settle(&mut self) {
        let Some(mut tile) = self.active.take() else {
            return;
        };
        self.score.fold();
        tile.trim_empty();
        self.tiles.push(tile);

        let particles = &mut self.particles;
        let rng = &mut self.particle_rng;
        let rows = clear_lines(
            &mut self.tiles,
            self.grid,
            &mut self.ids,
            &mut self.animations,
            |x, y, colour| particles.burst(x, y, colour, PARTICLES_PER_CELL, rng),
        );

        let points = calculate_line_score(rows.len(), self.level);
        if !rows.is_empty() {
            self.score.award(points);
            self.lines += rows.len() as u32;
            self.level = level_for_lines(self.lines);
            log::debug!(
                "{} rows for {} points, {} lines total",
                rows.len(),
                points,
                self.lines
            );
        }

        let spawned = self.spawn_next();
        self.last_event = Some(SettleEvent {
            rows,
            points,
            spawned,
        });
    }

    /// Make animations started from now on begin at `now_ms`.
    ///
    /// Key handlers call this before moving a tile between frames.
    pub fn set_clock(&mut self, now_ms: u64) {
        self.animations.set_clock(now_ms);
    }

    /// Advance animations to `now_ms`.
    pub fn run_animations(&mut self, now_ms: u64) {
        let mut store = SessionTiles {
            active: self.active.as_mut(),
            settled: &mut self.tiles,
        };
        self.animations.run(now_ms, &mut store);
    }

    pub fn tick_particles(&mut self, dt_ms: u32) {
        self.particles.tick(dt_ms, self.grid);
    }

    /// Current gravity period in ms.
    pub fn gravity_ms(&self) -> u32 {
        if self.config.level_gravity {
            gravity_interval_ms(self.level)
        } else {
            self.config.gravity_ms
        }
    }

    /// Draw the board: settled tiles, the active tile, particles, then the pause overlay.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, cell_size: f32, opts: &DrawOptions) {
        surface.clear();
        for tile in &self.tiles {
            tile.render(surface, cell_size, opts);
        }
        if self.state != SessionState::Paused {
            if let Some(active) = &self.active {
                active.render(surface, cell_size, opts);
            }
        }
        self.particles.render(surface, cell_size);

        if self.state == SessionState::Paused {
            let (w, h) = surface.size();
            surface.draw_text(w / 2.0, h / 2.0, "PAUSED", OVERLAY_COLOUR);
        }
    }

    /// Take the last settle event (consumed by observers).
    pub fn take_last_event(&mut self) -> Option<SettleEvent> {
        self.last_event.take()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Settled tiles in render order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn active(&self) -> Option<&Tile> {
        self.active.as_ref()
    }

    /// Upcoming kinds, next first.
    pub fn preview(&self) -> impl Iterator<Item = TileKind> + '_ {
        self.buffer.iter().map(|t| t.kind())
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn animations(&self) -> &TileAnimations {
        &self.animations
    }

    pub fn particles(&self) -> &Particles {
        &self.particles
    }

    /// Whether (x, y) is covered by a settled tile.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.tiles.iter().any(|t| t.occupies(x, y))
    }
}
