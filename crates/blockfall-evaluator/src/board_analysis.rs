//! Shape metrics of a grid: column heights, holes, aggregate height and bumpiness.
//!
//! All functions are pure; they read the grid and never mutate it.

use blockfall_engine::Grid;

/// Counts holes: empty cells below the topmost filled cell of their column.
///
/// Empty cells above a column's first filled cell are not holes.
#[must_use]
pub fn count_holes(grid: &Grid) -> usize {
    (0..Grid::WIDTH)
        .map(|x| {
            grid.column(x)
                .skip_while(|cell| !cell.is_filled())
                .filter(|cell| !cell.is_filled())
                .count()
        })
        .sum()
}

/// Sums the column heights.
#[must_use]
pub fn aggregate_height(grid: &Grid) -> usize {
    grid.column_heights().iter().sum()
}

/// Sums the absolute height differences of adjacent columns.
#[must_use]
pub fn bumpiness(grid: &Grid) -> usize {
    grid.column_heights()
        .windows(2)
        .map(|w| w[0].abs_diff(w[1]))
        .sum()
}

/// Metrics of a grid, computed once and reused by evaluators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardAnalysis {
    column_heights: [usize; Grid::WIDTH],
    num_holes: usize,
    aggregate_height: usize,
    bumpiness: usize,
}

impl BoardAnalysis {
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            column_heights: grid.column_heights(),
            num_holes: count_holes(grid),
            aggregate_height: aggregate_height(grid),
            bumpiness: bumpiness(grid),
        }
    }

    #[must_use]
    pub fn column_heights(&self) -> &[usize; Grid::WIDTH] {
        &self.column_heights
    }

    #[must_use]
    pub fn max_height(&self) -> usize {
        self.column_heights.iter().copied().max().unwrap_or(0)
    }

    #[must_use]
    pub fn num_holes(&self) -> usize {
        self.num_holes
    }

    #[must_use]
    pub fn aggregate_height(&self) -> usize {
        self.aggregate_height
    }

    #[must_use]
    pub fn bumpiness(&self) -> usize {
        self.bumpiness
    }
}
