//! Pieces module - the seven canonical tile shapes and colours
//!
//! Shapes are stored as square matrices in spawn orientation. There is no
//! rotation table: rotation is computed from the matrix (see [`Shape::rotated_cw`]).

use crate::shape::Shape;
use crate::types::{Rgb, TileKind};

/// Spawn matrix for a tile kind.
pub fn get_shape(kind: TileKind) -> Shape {
    match kind {
        TileKind::I => Shape::from_rows(&[
            &[0, 1, 0, 0],
            &[0, 1, 0, 0],
            &[0, 1, 0, 0],
            &[0, 1, 0, 0],
        ]),
        TileKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        TileKind::J => Shape::from_rows(&[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]]),
        TileKind::L => Shape::from_rows(&[&[1, 0, 0], &[1, 0, 0], &[1, 1, 0]]),
        TileKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]]),
        TileKind::T => Shape::from_rows(&[&[1, 1, 1], &[0, 1, 0], &[0, 0, 0]]),
        TileKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]]),
    }
}

/// Fixed colour of a tile kind.
pub fn get_colour(kind: TileKind) -> Rgb {
    match kind {
        TileKind::I => Rgb::from_hex(0x0092ff),
        TileKind::O => Rgb::from_hex(0x4900ff),
        TileKind::J => Rgb::from_hex(0xff0000),
        TileKind::L => Rgb::from_hex(0x49ff00),
        TileKind::S => Rgb::from_hex(0x00ff92),
        TileKind::T => Rgb::from_hex(0xffdb00),
        TileKind::Z => Rgb::from_hex(0xff00db),
    }
}
