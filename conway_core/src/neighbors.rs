// neighbors.rs - Live neighbor counting on a torus

use crate::Grid;

/// Row/column offsets of the eight cells around a cell.
#[rustfmt::skip]
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// Per-cell live neighbor counts, laid out like the grid they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborCounts {
    width: usize,
    height: usize,
    counts: Vec<u8>,
}

impl NeighborCounts {
    /// Counts the live neighbors of every cell in `grid`.
    ///
    /// Rows and columns wrap around, so the last row borders the first one.
    /// On grids less than three cells across, several offsets can wrap onto
    /// the same cell and each of them is counted.
    pub fn of(grid: &Grid) -> Self {
        let (width, height) = (grid.width(), grid.height());
        let mut counts = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                let count = OFFSETS
                    .iter()
                    .filter(|&&(dr, dc)| {
                        grid.at(wrap(row, dr, height), wrap(col, dc, width))
                    })
                    .count();
                counts.push(count as u8);
            }
        }
        Self { width, height, counts }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.height && col < self.width).then(|| self.counts[row * self.width + col])
    }

    /// Counts in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        &self.counts
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}
