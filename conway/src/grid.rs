// grid.rs - Grid types for Conway's Game of Life

use std::fmt;

use crate::config::Dimensions;
use crate::error::GridError;

/// A single cell as seen by a renderer.
///
/// `row` and `col` always match the position the cell was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub alive: bool,
}

/// Fixed-size bounded grid. Cells are stored row-major.
///
/// A grid is never resized in place; a new size means a new grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid of the given size.
    pub fn empty(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            cells: vec![false; dimensions.area()],
        }
    }

    /// Builds a grid from explicit rows, e.g. a seeded pattern.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let expected = rows.first().map(Vec::len).unwrap_or(0);
        if expected == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(GridError::Ragged { row, expected, found });
        }

        let dimensions = Dimensions::from_usize(rows.len(), expected);
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { dimensions, cells })
    }

    /// Builds a grid with the listed `(row, col)` positions alive.
    pub fn with_alive(dimensions: Dimensions, alive: &[(usize, usize)]) -> Result<Self, GridError> {
        let mut grid = Self::empty(dimensions);
        for &(row, col) in alive {
            let index = grid.index(row, col)?;
            grid.cells[index] = true;
        }
        Ok(grid)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows()
    }

    pub fn cols(&self) -> usize {
        self.dimensions.cols()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    /// Dead for out-of-range positions: nothing lives past the border.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.contains(row, col) && self.cells[row * self.cols() + col]
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.contains(row, col).then(|| Cell {
            row,
            col,
            alive: self.cells[row * self.cols() + col],
        })
    }

    pub fn row(&self, row: usize) -> Option<&[bool]> {
        (row < self.rows()).then(|| {
            let start = row * self.cols();
            &self.cells[start..start + self.cols()]
        })
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols();
        self.cells.iter().enumerate().map(move |(i, &alive)| Cell {
            row: i / cols,
            col: i % cols,
            alive,
        })
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Copy of this grid with one cell flipped.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Self, GridError> {
        let index = self.index(row, col)?;
        let mut next = self.clone();
        next.cells[index] = !next.cells[index];
        Ok(next)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if !self.contains(row, col) {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(row * self.cols() + col)
    }

    /// Assembles a grid from a row-major cell vector of matching size.
    pub(crate) fn from_cells(dimensions: Dimensions, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), dimensions.area());
        Self { dimensions, cells }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols()) {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dims(rows: i64, cols: i64) -> Dimensions {
        Dimensions::new(rows, cols).unwrap()
    }

    #[test]
    fn empty_grid_is_all_dead() {
        let grid = Grid::empty(dims(3, 4));
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.cells().count(), 12);
    }

    #[test]
    fn toggled_flips_exactly_one_cell() {
        let grid = Grid::empty(dims(3, 3));
        let once = grid.toggled(1, 2).unwrap();

        assert!(once.is_alive(1, 2));
        assert_eq!(once.population(), 1);
        // The source grid is untouched.
        assert_eq!(grid.population(), 0);

        let twice = once.toggled(1, 2).unwrap();
        assert_eq!(twice, grid);
    }

    #[test]
    fn toggled_out_of_range_is_an_error() {
        let grid = Grid::empty(dims(2, 5));
        assert_eq!(
            grid.toggled(2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0, rows: 2, cols: 5 })
        );
        assert!(grid.toggled(0, 5).is_err());
    }

    #[test]
    fn from_rows_rejects_bad_shapes() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
        assert_eq!(
            Grid::from_rows(vec![vec![true, false], vec![true]]),
            Err(GridError::Ragged { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn from_rows_keeps_layout() {
        let grid = Grid::from_rows(vec![vec![true, false, false], vec![false, false, true]]).unwrap();
        assert_eq!(grid.row(0), Some(&[true, false, false][..]));
        assert_eq!(grid.row(1), Some(&[false, false, true][..]));
        assert_eq!(grid.row(2), None);
        assert_eq!(grid.to_string(), "#..\n..#\n");
    }

    #[test]
    fn out_of_range_reads_are_dead() {
        let grid = Grid::from_rows(vec![vec![true]]).unwrap();
        assert!(grid.is_alive(0, 0));
        assert!(!grid.is_alive(1, 0));
        assert!(!grid.is_alive(0, 1));
        assert_eq!(grid.cell(1, 1), None);
    }

    proptest! {
        #[test]
        fn empty_grid_matches_dimensions(rows in 1i64..40, cols in 1i64..40) {
            let grid = Grid::empty(dims(rows, cols));
            prop_assert_eq!(grid.rows(), rows as usize);
            prop_assert_eq!(grid.cols(), cols as usize);
            for r in 0..grid.rows() {
                prop_assert_eq!(grid.row(r).map(<[bool]>::len), Some(cols as usize));
            }
            for cell in grid.cells() {
                prop_assert!(!cell.alive);
                prop_assert_eq!(grid.cell(cell.row, cell.col), Some(cell));
            }
        }
    }
}
