// grid.rs - Dense toroidal cell grid

use crate::{LifeError, LifeResult};

/// Fixed-size matrix of cell states, stored row by row.
///
/// Both dimensions are at least one; every `(row, col)` inside them holds a
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid with `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> LifeResult<Self> {
        if width == 0 || height == 0 {
            return Err(LifeError::EmptyDimensions { width, height });
        }
        let len = width
            .checked_mul(height)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(LifeError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![false; len],
        })
    }

    /// Builds a grid from equally long rows.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> LifeResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height)?;
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(crate::MalformedGrid::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                }
                .into());
            }
            grid.cells[row * width..(row + 1) * width].copy_from_slice(&cells);
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Returns the cell state, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.contains(row, col)
            .then(|| self.cells[row * self.width + col])
    }

    /// Cell state at a position already known to be in range.
    pub(crate) fn at(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        if !self.contains(row, col) {
            return Err(self.out_of_range(row, col));
        }
        self.cells[row * self.width + col] = alive;
        Ok(())
    }

    /// Sets a cell with both coordinates reduced modulo the grid size.
    pub fn set_wrapping(&mut self, row: usize, col: usize, alive: bool) {
        let (row, col) = (row % self.height, col % self.width);
        self.cells[row * self.width + col] = alive;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Iterates over the coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i / width, i % width))
    }

    pub(crate) fn out_of_range(&self, row: usize, col: usize) -> LifeError {
        LifeError::OutOfRange {
            row,
            col,
            width: self.width,
            height: self.height,
        }
    }
}
