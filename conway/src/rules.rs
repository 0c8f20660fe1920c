// rules.rs - Conway's B3/S23 rule on a bounded grid

use crate::grid::Grid;

/// Offsets of the eight neighbours around a cell.
#[rustfmt::skip]
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Live neighbours of `(row, col)`. Positions past the edge do not wrap,
/// so corner cells have 3 candidates and edge cells 5.
pub fn count_alive_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    NEIGHBOURS
        .iter()
        .filter_map(|&(dr, dc)| Some((row.checked_add_signed(dr)?, col.checked_add_signed(dc)?)))
        .filter(|&(nr, nc)| grid.is_alive(nr, nc))
        .count() as u8
}

pub fn next_state(alive: bool, neighbours: u8) -> bool {
    match (alive, neighbours) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3)            => true, // Birth
        _                     => false, // Death or stays dead
    }
}

/// Next generation. Every count is read from `grid`, never from the
/// partially built result.
pub fn step(grid: &Grid) -> Grid {
    let cells = (0..grid.rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
        .map(|(row, col)| next_state(grid.is_alive(row, col), count_alive_neighbors(grid, row, col)))
        .collect();
    Grid::from_cells(grid.dimensions(), cells)
}
