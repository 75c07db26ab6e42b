//! Grid module - board bounds and coordinate types
//!
//! The grid owns no cells. Occupancy lives in the settled tiles; the grid only
//! answers whether a coordinate is on the board.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use crate::types::{GRID_HEIGHT, GRID_WIDTH};

/// Integer board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fractional draw position in board-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawPos {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for DrawPos {
    fn from(p: Point) -> Self {
        Self {
            x: p.x as f32,
            y: p.y as f32,
        }
    }
}

/// Board bounds, immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check if (x, y) lies on the board
    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    #[inline(always)]
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Total number of cells on the board
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_10_by_20() {
        let grid = Grid::default();
        assert_eq!(grid.width, 10);
        assert_eq!(grid.height, 20);
        assert_eq!(grid.area(), 200);
    }

    #[test]
    fn test_contains_edges() {
        let grid = Grid::default();
        assert!(grid.contains(0, 0));
        assert!(grid.contains(9, 19));
        assert!(!grid.contains(-1, 0));
        assert!(!grid.contains(0, -1));
        assert!(!grid.contains(10, 0));
        assert!(!grid.contains(0, 20));
    }
}
