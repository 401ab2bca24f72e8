// rules.rs - Conway's birth/survival rule

use crate::{Grid, NeighborCounts};

/// Next state of one cell given its current state and live neighbor count.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Computes the generation after `grid`.
///
/// Every cell is decided from `grid` alone; nothing written to the result is
/// read back while it is being built.
pub fn advance(grid: &Grid) -> Grid {
    let counts = NeighborCounts::of(grid);
    let mut next = grid.clone();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let neighbors = counts.as_slice()[row * grid.width() + col];
            next.set_wrapping(row, col, next_state(grid.at(row, col), neighbors));
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, live: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(row, col) in live {
            grid.set(row, col, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_rule_table() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live cell, {n} neighbors");
            assert_eq!(next_state(false, n), n == 3, "dead cell, {n} neighbors");
        }
    }

    #[test]
    fn test_dead_grid_stays_dead() {
        for (width, height) in [(1, 1), (2, 3), (5, 5), (17, 9)] {
            let grid = Grid::new(width, height).unwrap();
            assert_eq!(advance(&grid), grid);
        }
    }

    #[test]
    fn test_isolated_cell_dies() {
        let grid = grid_with(5, 5, &[(2, 2)]);
        assert!(advance(&grid).is_empty());
    }

    #[test]
    fn test_block_is_still_life() {
        for (width, height, origin) in [(3, 3, (0, 0)), (3, 5, (2, 2)), (4, 4, (1, 1)), (10, 7, (6, 9))] {
            let (r, c) = origin;
            let mut grid = Grid::new(width, height).unwrap();
            for (dr, dc) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                grid.set_wrapping(r + dr, c + dc, true);
            }
            assert_eq!(advance(&grid), grid, "block on {width}x{height}");
        }
    }

    #[test]
    fn test_block_fills_two_by_two_torus() {
        // Through the wrap all eight offsets land on a partner cell.
        let grid = grid_with(2, 2, &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(advance(&grid).is_empty());
    }

    #[test]
    fn test_blinker_oscillates_on_torus() {
        let horizontal = grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let once = advance(&horizontal);
        assert_eq!(once, vertical);
        assert_eq!(advance(&once), horizontal);
    }

    #[test]
    fn test_glider_wraps_around() {
        // A glider moves one cell diagonally every four generations, so after
        // 4 * 6 generations on a 6x6 torus it is back where it started.
        let glider = grid_with(6, 6, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut grid = glider.clone();
        for _ in 0..24 {
            grid = advance(&grid);
            assert_eq!(grid.population(), 5);
        }
        assert_eq!(grid, glider);
    }
}
