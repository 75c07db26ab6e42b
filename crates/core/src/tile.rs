//! Tile module - a shape matrix placed on the board
//!
//! A tile has a logical position (`pos`, always integer and collision-free once
//! committed) and a draw position (`draw_pos`) that animations move towards
//! `pos`. Everything that decides gameplay reads `pos`; rendering reads
//! `draw_pos`.

use crate::animation::{Animations, Easing, PropertyStore};
use crate::cell::{sides, Cell};
use crate::grid::{DrawPos, Grid, Point};
use crate::pieces::{get_colour, get_shape};
use crate::render::{DrawOptions, Surface};
use crate::shape::Shape;
use crate::types::{Rgb, TileKind, MOVE_ANIMATION_MS};

/// Session-unique tile handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// Issues tile ids for one session.
#[derive(Debug, Clone, Default)]
pub struct TileIds {
    next: u32,
}

impl TileIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Component of `draw_pos` an animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Animation target: one axis of one tile's draw position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawTarget {
    pub tile: TileId,
    pub axis: Axis,
}

/// Animations over tile draw positions.
pub type TileAnimations = Animations<DrawTarget>;

/// A falling or settled piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
    shape: Shape,
    colour: Rgb,
    pub pos: Point,
    pub draw_pos: DrawPos,
}

impl Tile {
    /// Create a tile of `kind` at the spawn position for `grid`.
    ///
    /// Spawn column is `floor(width / 2 - n / 2)` for an n×n matrix, row 0.
    pub fn new(id: TileId, kind: TileKind, grid: Grid) -> Self {
        let shape = get_shape(kind);
        let n = shape.width() as i32;
        // floor(w/2 - n/2) without going through floats
        let x = (grid.width - n).div_euclid(2);
        Self::from_parts(id, kind, shape, get_colour(kind), Point::new(x, 0))
    }

    /// Assemble a tile from an explicit shape and position; `draw_pos` starts at `pos`.
    pub fn from_parts(id: TileId, kind: TileKind, shape: Shape, colour: Rgb, pos: Point) -> Self {
        Self {
            id,
            kind,
            shape,
            colour,
            pos,
            draw_pos: pos.into(),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub(crate) fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn colour(&self) -> Rgb {
        self.colour
    }

    /// Every entry of the shape matrix as a cell view, row by row.
    ///
    /// The iterator borrows the tile; call again to restart.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (pos, draw) = (self.pos, self.draw_pos);
        self.shape.rows().iter().enumerate().flat_map(move |(y, row)| {
            row.iter().enumerate().map(move |(x, &filled)| Cell {
                rel_x: x as i32,
                rel_y: y as i32,
                x: pos.x + x as i32,
                y: pos.y + y as i32,
                draw_x: draw.x + x as f32,
                draw_y: draw.y + y as f32,
                filled,
            })
        })
    }

    pub fn filled_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(|c| c.filled)
    }

    /// Check if this tile has a filled sub-cell at absolute (x, y)
    pub fn occupies(&self, x: i32, y: i32) -> bool {
        let rx = x - self.pos.x;
        let ry = y - self.pos.y;
        rx >= 0 && ry >= 0 && self.shape.get(rx as usize, ry as usize)
    }

    /// Check whether the transformed filled cells leave the grid or hit a settled tile.
    ///
    /// `transform` maps a cell view to the absolute coordinate the cell would take.
    pub fn detect_collision(
        &self,
        transform: impl Fn(&Cell) -> Point,
        settled: &[Tile],
        grid: Grid,
    ) -> bool {
        self.filled_cells().any(|cell| {
            let p = transform(&cell);
            !grid.contains_point(p) || settled.iter().any(|t| t.occupies(p.x, p.y))
        })
    }

    /// True when the tile overlaps nothing at its current position.
    pub fn fits(&self, settled: &[Tile], grid: Grid) -> bool {
        !self.detect_collision(|c| Point::new(c.x, c.y), settled, grid)
    }

    fn try_move(
        &mut self,
        dx: i32,
        dy: i32,
        settled: &[Tile],
        grid: Grid,
        animations: &mut TileAnimations,
    ) -> bool {
        if self.detect_collision(|c| Point::new(c.x + dx, c.y + dy), settled, grid) {
            return false;
        }

        self.pos.x += dx;
        self.pos.y += dy;

        let (axis, from, to) = if dx != 0 {
            (Axis::X, self.draw_pos.x, self.pos.x as f32)
        } else {
            (Axis::Y, self.draw_pos.y, self.pos.y as f32)
        };
        animations.start(
            DrawTarget { tile: self.id, axis },
            Easing::Linear,
            from,
            to,
            MOVE_ANIMATION_MS,
        );
        true
    }

    pub fn move_down(&mut self, settled: &[Tile], grid: Grid, animations: &mut TileAnimations) -> bool {
        self.try_move(0, 1, settled, grid, animations)
    }

    pub fn move_left(&mut self, settled: &[Tile], grid: Grid, animations: &mut TileAnimations) -> bool {
        self.try_move(-1, 0, settled, grid, animations)
    }

    pub fn move_right(&mut self, settled: &[Tile], grid: Grid, animations: &mut TileAnimations) -> bool {
        self.try_move(1, 0, settled, grid, animations)
    }

    /// Rotate 90° clockwise in place. No wall kicks: a blocked rotation fails.
    pub fn rotate(&mut self, settled: &[Tile], grid: Grid) -> bool {
        let n = self.shape.height().max(self.shape.width()) as i32;
        let pos = self.pos;
        let blocked = self.detect_collision(
            |c| Point::new(pos.x + n - 1 - c.rel_y, pos.y + c.rel_x),
            settled,
            grid,
        );
        if blocked {
            return false;
        }
        self.shape = self.shape.rotated_cw();
        true
    }

    /// Drop straight down until blocked. Returns the rows travelled.
    ///
    /// No per-row animation: `draw_pos` snaps to the landing position and any
    /// running slide on this tile is cancelled.
    pub fn hard_drop(&mut self, settled: &[Tile], grid: Grid, animations: &mut TileAnimations) -> u32 {
        let mut rows = 0;
        while !self.detect_collision(|c| Point::new(c.x, c.y + 1), settled, grid) {
            self.pos.y += 1;
            rows += 1;
        }
        let id = self.id;
        animations.cancel(|t| t.tile == id);
        self.draw_pos = self.pos.into();
        rows
    }

    /// Drop trailing empty rows from the shape.
    pub fn trim_empty(&mut self) {
        self.shape.trim_empty();
    }

    pub fn draw_value_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::X => &mut self.draw_pos.x,
            Axis::Y => &mut self.draw_pos.y,
        }
    }

    /// Draw filled cells at `draw_pos`.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, cell_size: f32, opts: &DrawOptions) {
        for cell in self.filled_cells() {
            let s = sides(&self.shape, cell.rel_x as usize, cell.rel_y as usize);
            cell.render(surface, cell_size, s, self.colour, opts);
        }
    }
}

impl PropertyStore<DrawTarget> for [Tile] {
    fn property_mut(&mut self, target: &DrawTarget) -> Option<&mut f32> {
        self.iter_mut()
            .find(|t| t.id == target.tile)
            .map(|t| t.draw_value_mut(target.axis))
    }
}
