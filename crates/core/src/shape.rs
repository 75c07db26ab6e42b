//! Shape matrix - occupancy of a tile's sub-cells
//!
//! A freshly created shape is square (N×N). Line clears carve rows out of
//! settled shapes, so a settled shape may be shorter than it is wide.

/// Row-major 0/1 matrix of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build from 0/1 rows. All rows must have the same length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        debug_assert!(rows.iter().all(|r| r.len() == width), "ragged shape rows");
        Self {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|&v| v != 0).collect())
                .collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Occupancy at (x, y); anything outside the matrix is empty.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&f| f).count())
            .sum()
    }

    /// True when no sub-cell is filled (the tile is logically dead).
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&f| !f))
    }

    /// Rotate 90° clockwise: the entry at (x, y) moves to (n-1-y, x).
    pub fn rotated_cw(&self) -> Shape {
        let n = self.height().max(self.width());
        let mut rows = vec![vec![false; n]; n];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.get(y, n - 1 - x);
            }
        }
        Shape { rows }
    }

    /// Remove trailing rows that contain no filled cell.
    pub fn trim_empty(&mut self) {
        while self
            .rows
            .last()
            .is_some_and(|row| row.iter().all(|&f| !f))
        {
            self.rows.pop();
        }
    }

    /// Remove and return the last row.
    pub fn pop_row(&mut self) -> Option<Vec<bool>> {
        self.rows.pop()
    }

    /// Split off rows `[at, height)` into a new shape; `self` keeps `[0, at)`.
    pub fn split_off(&mut self, at: usize) -> Shape {
        Shape {
            rows: self.rows.split_off(at.min(self.rows.len())),
        }
    }
}
