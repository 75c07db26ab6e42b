//! Tile tests - movement, rotation and collision on an otherwise empty board

use tilefall::core::{get_shape, Grid, Point, Shape, Tile, TileAnimations, TileId};
use tilefall::types::{Rgb, TileKind};

fn settled(rows: &[&[u8]], x: i32, y: i32) -> Tile {
    Tile::from_parts(
        TileId(100),
        TileKind::O,
        Shape::from_rows(rows),
        Rgb::default(),
        Point::new(x, y),
    )
}

#[test]
fn test_four_rotations_restore_every_shape() {
    let grid = Grid::default();
    for kind in TileKind::ALL {
        let mut tile = Tile::new(TileId(1), kind, grid);
        tile.pos = Point::new(3, 5);
        let original = tile.shape().clone();
        for _ in 0..4 {
            assert!(tile.rotate(&[], grid), "{:?} rotation blocked", kind);
        }
        assert_eq!(tile.shape(), &original, "{:?}", kind);
        assert_eq!(tile.shape().filled_count(), 4);
    }
}

#[test]
fn test_two_rotations_twice_is_identity() {
    for kind in TileKind::ALL {
        let shape = get_shape(kind);
        let half = shape.rotated_cw().rotated_cw();
        assert_eq!(half.rotated_cw().rotated_cw(), shape);
    }
}

#[test]
fn test_o_tile_slides_left_then_right() {
    let grid = Grid::default();
    let mut anims = TileAnimations::new();
    let mut tile = Tile::new(TileId(1), TileKind::O, grid);
    let initial = tile.pos.x;

    for _ in 0..4 {
        assert!(tile.move_left(&[], grid, &mut anims));
    }
    assert!(tile.move_right(&[], grid, &mut anims));
    assert_eq!(tile.pos.x, initial - 3);
    // Only one running animation per axis.
    assert_eq!(anims.len(), 1);
}

#[test]
fn test_collision_with_bounds_and_settled_cells() {
    let grid = Grid::default();
    let tile = Tile::new(TileId(1), TileKind::T, grid);
    let block = settled(&[&[1]], 4, 2);

    // In place: nothing in the way.
    assert!(!tile.detect_collision(|c| Point::new(c.x, c.y), &[], grid));
    // Off the top.
    assert!(tile.detect_collision(|c| Point::new(c.x, c.y - 1), &[], grid));
    // Off the left and right edges.
    assert!(tile.detect_collision(|c| Point::new(c.x - 4, c.y), &[], grid));
    assert!(tile.detect_collision(|c| Point::new(c.x + 5, c.y), &[], grid));
    // T stem at (4, 1) lands on the settled cell at (4, 2).
    assert!(tile.detect_collision(|c| Point::new(c.x, c.y + 1), &[block.clone()], grid));
    // Empty matrix entries never collide: (3, 1) is empty in the T.
    let beside = settled(&[&[1]], 3, 1);
    assert!(!tile.detect_collision(|c| Point::new(c.x, c.y), &[beside], grid));
}

#[test]
fn test_move_down_stops_on_settled_tile() {
    let grid = Grid::default();
    let mut anims = TileAnimations::new();
    let floor = settled(&[&[1; 10]], 0, 10);
    let mut tile = Tile::new(TileId(1), TileKind::O, grid);
    let mut steps = 0;
    while tile.move_down(std::slice::from_ref(&floor), grid, &mut anims) {
        steps += 1;
    }
    assert_eq!(steps, 8);
    assert_eq!(tile.pos.y, 8);
}

#[test]
fn test_rotation_blocked_by_settled_tile() {
    let grid = Grid::default();
    let mut tile = Tile::new(TileId(1), TileKind::T, grid);
    tile.pos = Point::new(3, 5);
    let before = tile.shape().clone();
    // Rotated T puts a cell at (5, 7); occupy it.
    let blocker = settled(&[&[1]], 5, 7);
    assert!(!tile.rotate(&[blocker], grid));
    assert_eq!(tile.shape(), &before);
}
