//! Line clear engine - removes full rows from the settled tiles
//!
//! Rows are found once, before anything moves, and then processed in
//! ascending order. Clearing a row only moves content that lies above it, so
//! rows further down still hold their pre-clear contents when their turn
//! comes; this is the same as removing all full rows at once.
//!
//! For each full row, every settled tile is in one of four situations:
//!
//! - the row is the tile's last row: pop it and shift the tile down one
//! - the row cuts through the middle: the rows below the cut become a new
//!   tile at `row + 1`, the rest pops the cleared row and shifts down one
//! - the row is below the tile: shift the tile down one
//! - the row is above the tile: nothing to do

use arrayvec::ArrayVec;

use crate::animation::Easing;
use crate::grid::{Grid, Point};
use crate::tile::{Axis, DrawTarget, Tile, TileAnimations, TileId, TileIds};
use crate::types::{Rgb, DROP_ANIMATION_MS};

/// Most rows a single settle can complete (height of the tallest shape).
pub const MAX_ROWS_PER_CLEAR: usize = 4;

/// Indices of full rows, ascending.
pub fn find_full_rows(tiles: &[Tile], grid: Grid) -> ArrayVec<i32, MAX_ROWS_PER_CLEAR> {
    let mut counts = vec![0i32; grid.height.max(0) as usize];
    for tile in tiles {
        for cell in tile.filled_cells() {
            if grid.contains(cell.x, cell.y) {
                counts[cell.y as usize] += 1;
            }
        }
    }

    let mut rows = ArrayVec::new();
    for (y, &count) in counts.iter().enumerate() {
        if count == grid.width && rows.try_push(y as i32).is_err() {
            log::warn!("more than {} full rows, deferring row {}", MAX_ROWS_PER_CLEAR, y);
        }
    }
    rows
}

/// Clear every full row, splitting and shifting tiles as needed.
///
/// Each tile that moved gets an eased fall from its current draw position to
/// its new position. `on_cleared` is called once per filled cell removed, with
/// the cell's absolute coordinate and colour. Returns the cleared row indices.
pub fn clear_lines(
    tiles: &mut Vec<Tile>,
    grid: Grid,
    ids: &mut TileIds,
    animations: &mut TileAnimations,
    mut on_cleared: impl FnMut(i32, i32, Rgb),
) -> ArrayVec<i32, MAX_ROWS_PER_CLEAR> {
    let rows = find_full_rows(tiles, grid);
    if rows.is_empty() {
        return rows;
    }

    let mut moved: Vec<TileId> = Vec::new();
    let mut mark = |id: TileId| {
        if !moved.contains(&id) {
            moved.push(id);
        }
    };

    for &row in &rows {
        let mut i = 0;
        while i < tiles.len() {
            let tile = &mut tiles[i];
            i += 1;

            let height = tile.shape().height() as i32;
            if height == 0 {
                continue;
            }
            let cut = row - tile.pos.y;

            if cut < 0 {
                continue;
            }
            if cut >= height {
                tile.pos.y += 1;
                mark(tile.id());
                continue;
            }

            let colour = tile.colour();
            let origin = tile.pos;
            if let Some(cleared) = tile.shape().rows().get(cut as usize) {
                for (x, _) in cleared.iter().enumerate().filter(|(_, f)| **f) {
                    on_cleared(origin.x + x as i32, row, colour);
                }
            }

            if cut < height - 1 {
                let lower = tile.shape_mut().split_off(cut as usize + 1);
                let kind = tile.kind();
                let below = Tile::from_parts(
                    ids.next_id(),
                    kind,
                    lower,
                    colour,
                    Point::new(origin.x, row + 1),
                );
                tiles[i - 1].shape_mut().pop_row();
                tiles[i - 1].pos.y += 1;
                mark(tiles[i - 1].id());
                tiles.push(below);
            } else {
                tile.shape_mut().pop_row();
                tile.pos.y += 1;
                mark(tile.id());
            }
        }
    }

    for tile in tiles.iter_mut() {
        tile.trim_empty();
    }
    tiles.retain(|t| !t.shape().is_empty());

    for tile in tiles.iter().filter(|t| moved.contains(&t.id())) {
        animations.start(
            DrawTarget {
                tile: tile.id(),
                axis: Axis::Y,
            },
            Easing::Ease,
            tile.draw_pos.y,
            tile.pos.y as f32,
            DROP_ANIMATION_MS,
        );
    }

    log::debug!("cleared rows {:?}, {} tiles shifted", rows.as_slice(), moved.len());
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use crate::types::TileKind;

    fn block(ids: &mut TileIds, rows: &[&[u8]], x: i32, y: i32) -> Tile {
        Tile::from_parts(
            ids.next_id(),
            TileKind::I,
            Shape::from_rows(rows),
            Rgb::new(1, 1, 1),
            Point::new(x, y),
        )
    }

    fn filled(tiles: &[Tile]) -> usize {
        tiles.iter().map(|t| t.shape().filled_count()).sum()
    }

    #[test]
    fn test_no_full_rows_is_a_no_op() {
        let mut ids = TileIds::new();
        let mut anims = TileAnimations::new();
        let mut tiles = vec![block(&mut ids, &[&[1, 1, 1, 1]], 0, 19)];
        let rows = clear_lines(&mut tiles, Grid::default(), &mut ids, &mut anims, |_, _, _| {});
        assert!(rows.is_empty());
        assert_eq!(tiles[0].pos, Point::new(0, 19));
        assert!(anims.is_empty());
    }

    #[test]
    fn test_last_row_clear_pops_and_drops_dead_tiles() {
        let mut ids = TileIds::new();
        let mut anims = TileAnimations::new();
        let mut tiles = vec![
            block(&mut ids, &[&[1, 1, 1, 1, 1]], 0, 19),
            block(&mut ids, &[&[1, 1, 1, 1, 1]], 5, 19),
        ];
        let mut debris = 0;
        let rows = clear_lines(&mut tiles, Grid::default(), &mut ids, &mut anims, |_, y, _| {
            assert_eq!(y, 19);
            debris += 1;
        });
        assert_eq!(rows.as_slice(), &[19]);
        assert_eq!(debris, 10);
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_middle_row_splits_tile() {
        let mut ids = TileIds::new();
        let mut anims = TileAnimations::new();
        // A 1-wide column spanning rows 17..=19, and a 9-wide bar completing row 18.
        let column = block(&mut ids, &[&[1], &[1], &[1]], 0, 17);
        let column_id = column.id();
        let mut tiles = vec![column, block(&mut ids, &[&[1; 9]], 1, 18)];

        let before = filled(&tiles);
        let rows = clear_lines(&mut tiles, Grid::default(), &mut ids, &mut anims, |_, _, _| {});
        assert_eq!(rows.as_slice(), &[18]);
        assert_eq!(filled(&tiles), before - 10);
        assert_eq!(tiles.len(), 2);

        let upper = tiles.iter().find(|t| t.id() == column_id).unwrap();
        assert_eq!(upper.pos, Point::new(0, 18));
        assert_eq!(upper.shape().height(), 1);

        let lower = tiles.iter().find(|t| t.id() != column_id).unwrap();
        assert_eq!(lower.pos, Point::new(0, 19));
        assert_eq!(lower.draw_pos.y, 19.0);
        assert!(lower.occupies(0, 19));

        // No overlap between the halves.
        assert!(!upper.occupies(0, 19));
        assert!(anims.is_animating(&DrawTarget {
            tile: column_id,
            axis: Axis::Y
        }));
    }

    #[test]
    fn test_tiles_above_shift_by_rows_cleared() {
        let mut ids = TileIds::new();
        let mut anims = TileAnimations::new();
        let above = block(&mut ids, &[&[1]], 4, 10);
        let above_id = above.id();
        let mut tiles = vec![
            above,
            block(&mut ids, &[&[1; 10], &[1; 10]], 0, 18),
        ];
        let rows = clear_lines(&mut tiles, Grid::default(), &mut ids, &mut anims, |_, _, _| {});
        assert_eq!(rows.as_slice(), &[18, 19]);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].id(), above_id);
        assert_eq!(tiles[0].pos, Point::new(4, 12));
        // The fall is animated from the old draw position.
        assert_eq!(tiles[0].draw_pos.y, 10.0);
        let anim = anims
            .get(&DrawTarget {
                tile: above_id,
                axis: Axis::Y,
            })
            .unwrap();
        assert_eq!(anim.final_value(), 12.0);
    }

    #[test]
    fn test_non_adjacent_rows_in_one_tile() {
        let mut ids = TileIds::new();
        let mut anims = TileAnimations::new();
        // Column occupying rows 16..=19; rows 17 and 19 are completed by bars.
        let mut tiles = vec![
            block(&mut ids, &[&[1], &[1], &[1], &[1]], 0, 16),
            block(&mut ids, &[&[1; 9]], 1, 17),
            block(&mut ids, &[&[1; 9]], 1, 19),
        ];
        let before = filled(&tiles);
        let rows = clear_lines(&mut tiles, Grid::default(), &mut ids, &mut anims, |_, _, _| {});
        assert_eq!(rows.as_slice(), &[17, 19]);
        assert_eq!(filled(&tiles), before - 20);

        // Column cells from rows 16 and 18 survive and land on rows 18 and 19.
        let mut occupied: Vec<i32> = tiles
            .iter()
            .flat_map(|t| t.filled_cells().map(|c| c.y).collect::<Vec<_>>())
            .collect();
        occupied.sort();
        assert_eq!(occupied, vec![18, 19]);
        assert!(find_full_rows(&tiles, Grid::default()).is_empty());
    }
}
