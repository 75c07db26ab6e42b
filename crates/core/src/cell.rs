//! Cell views - transient per-sub-cell projections of a tile

use crate::render::{DrawOptions, Surface};
use crate::shape::Shape;
use crate::types::Rgb;

/// One entry of a tile's shape matrix, resolved against the tile's position.
///
/// Produced by [`Tile::cells`](crate::tile::Tile::cells); never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Column within the shape matrix
    pub rel_x: i32,
    /// Row within the shape matrix
    pub rel_y: i32,
    /// Absolute board column
    pub x: i32,
    /// Absolute board row
    pub y: i32,
    /// Interpolated draw column (may lag behind `x`)
    pub draw_x: f32,
    /// Interpolated draw row (may lag behind `y`)
    pub draw_y: f32,
    pub filled: bool,
}

/// Which orthogonal neighbours inside the same shape are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub up: bool,
    pub right: bool,
    pub down: bool,
    pub left: bool,
}

/// Neighbour occupancy of (x, y) within `shape`. Cosmetic only.
pub fn sides(shape: &Shape, x: usize, y: usize) -> Sides {
    Sides {
        up: y > 0 && shape.get(x, y - 1),
        right: shape.get(x + 1, y),
        down: shape.get(x, y + 1),
        left: x > 0 && shape.get(x - 1, y),
    }
}

impl Cell {
    /// Draw this cell at its interpolated position.
    ///
    /// Joints are drawn towards the upper and right neighbours only; the
    /// neighbour on the other side draws the matching half.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        size: f32,
        sides: Sides,
        colour: Rgb,
        opts: &DrawOptions,
    ) {
        if opts.joints {
            let j = opts.joint_size;
            if sides.up {
                surface.fill_rect(
                    size * (self.draw_x + 0.5 - j / 2.0),
                    size * (self.draw_y - 0.5),
                    size * j,
                    size,
                    colour,
                );
            }
            if sides.right {
                surface.fill_rect(
                    size * (self.draw_x + 0.5),
                    size * (self.draw_y + 0.5 - j / 2.0),
                    size,
                    size * j,
                    colour,
                );
            }
        }

        let inset = opts.inset;
        surface.fill_rect(
            size * (self.draw_x + inset),
            size * (self.draw_y + inset),
            size * (1.0 - 2.0 * inset),
            size * (1.0 - 2.0 * inset),
            colour,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    #[test]
    fn test_sides_of_t_centre() {
        let t = Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0], &[0, 0, 0]]);
        assert_eq!(
            sides(&t, 1, 0),
            Sides {
                up: false,
                right: true,
                down: true,
                left: true
            }
        );
        assert_eq!(
            sides(&t, 1, 1),
            Sides {
                up: true,
                right: false,
                down: false,
                left: false
            }
        );
    }

    #[test]
    fn test_render_without_joints_draws_one_rect() {
        let cell = Cell {
            rel_x: 0,
            rel_y: 0,
            x: 2,
            y: 3,
            draw_x: 2.0,
            draw_y: 3.0,
            filled: true,
        };
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let opts = DrawOptions {
            joints: false,
            ..DrawOptions::default()
        };
        let sides = Sides {
            up: true,
            right: true,
            down: false,
            left: false,
        };
        cell.render(&mut surface, 10.0, sides, Rgb::new(1, 2, 3), &opts);
        assert_eq!(surface.rects.len(), 1);
        let (x, y, w, h, _) = surface.rects[0];
        assert!((x - 21.0).abs() < 1e-4);
        assert!((y - 31.0).abs() < 1e-4);
        assert!((w - 8.0).abs() < 1e-4);
        assert!((h - 8.0).abs() < 1e-4);
    }

    #[test]
    fn test_render_with_joints_adds_bars() {
        let cell = Cell {
            rel_x: 0,
            rel_y: 0,
            x: 0,
            y: 0,
            draw_x: 0.0,
            draw_y: 0.0,
            filled: true,
        };
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let sides = Sides {
            up: true,
            right: true,
            down: true,
            left: true,
        };
        cell.render(&mut surface, 10.0, sides, Rgb::default(), &DrawOptions::default());
        assert_eq!(surface.rects.len(), 3);
    }
}
