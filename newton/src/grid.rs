use std::ops::Index;

use itertools::Itertools;

/// Square grid of root indices, stored row by row.
///
/// Row `i` holds the points with the `i`-th imaginary part (row 0 is
/// `y_min`), column `j` those with the `j`-th real part. `None` marks a
/// starting point that did not converge.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexGrid {
    size: usize,
    cells: Vec<Option<usize>>,
}

impl IndexGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Number of rows, equal to the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self[(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, index: Option<usize>) {
        assert!(row < self.size && col < self.size);
        self.cells[row * self.size + col] = index;
    }

    /// Numeric label with unconverged cells folded into 0, the same value
    /// as the first root.
    pub fn label(&self, row: usize, col: usize) -> usize {
        self.get(row, col).unwrap_or_default()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<usize>]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn converged_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Root indices present in the grid, in increasing order.
    pub fn distinct_indices(&self) -> Vec<usize> {
        self.cells.iter().flatten().copied().sorted().dedup().collect()
    }
}

impl Index<(usize, usize)> for IndexGrid {
    type Output = Option<usize>;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.size && col < self.size);
        &self.cells[row * self.size + col]
    }
}
