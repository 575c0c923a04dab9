use serde::{Deserialize, Serialize};

use super::piece::{Piece, Rgb};

/// Number of columns in the grid.
pub const GRID_WIDTH: usize = 10;
/// Number of rows in the grid.
pub const GRID_HEIGHT: usize = 20;

/// A single grid cell.
///
/// A cell is either empty or filled with a concrete color; there is no
/// partially-filled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Rgb),
}

impl Cell {
    #[must_use]
    pub const fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    #[must_use]
    pub const fn color(self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GridRow {
    cells: [Cell; GRID_WIDTH],
}

impl GridRow {
    const EMPTY: Self = Self {
        cells: [Cell::Empty; GRID_WIDTH],
    };

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_filled())
    }
}

/// Fixed-size cell matrix: 10 columns × 20 rows.
///
/// Row 0 is the top visible row and rows grow downward. Coordinates above
/// the grid (`y < 0`) are treated as free space by [`Grid::is_occupied`].
///
/// Cell writes ([`Grid::set_cell`], [`Grid::clear_cell`]) take in-bounds
/// `usize` coordinates; bounds checking belongs to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [GridRow; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Grid {
    pub const WIDTH: usize = GRID_WIDTH;
    pub const HEIGHT: usize = GRID_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [GridRow::EMPTY; GRID_HEIGHT],
    };

    /// Returns the cell at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.cells.get(x).copied()
    }

    /// Returns `true` iff `(x, y)` lies inside the grid and is filled.
    ///
    /// Cells above the grid are never occupied.
    #[must_use]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.cell(x, y).is_some_and(Cell::is_filled)
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, color: Rgb) {
        self.rows[y].cells[x] = Cell::Filled(color);
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn clear_cell(&mut self, x: usize, y: usize) {
        self.rows[y].cells[x] = Cell::Empty;
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].is_full()
    }

    /// Discards row `y` and shifts every row above it down by one.
    ///
    /// Row 0 becomes empty.
    pub fn collapse_row(&mut self, y: usize) {
        self.rows.copy_within(0..y, 1);
        self.rows[0] = GridRow::EMPTY;
    }

    /// Collapses every full row and returns how many were removed.
    ///
    /// Rows are scanned top to bottom. After a collapse the same index is
    /// tested again, since it now holds the row that was above it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        let mut y = 0;
        while y < GRID_HEIGHT {
            if self.is_row_full(y) {
                self.collapse_row(y);
                count += 1;
                continue;
            }
            y += 1;
        }
        count
    }

    /// Writes the piece's on-grid cells with its color.
    ///
    /// Cells above the grid are dropped. Cells outside the side or bottom
    /// walls are the caller's responsibility and are skipped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        let color = piece.rgb();
        for (x, y) in piece.occupied_positions() {
            let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                continue;
            };
            if x < GRID_WIDTH && y < GRID_HEIGHT {
                self.set_cell(x, y, color);
            }
        }
    }

    /// Height of column `x`: `HEIGHT - topmost filled row`, or 0 when empty.
    #[must_use]
    pub fn column_height(&self, x: usize) -> usize {
        self.rows
            .iter()
            .position(|row| row.cells[x].is_filled())
            .map_or(0, |top| GRID_HEIGHT - top)
    }

    #[must_use]
    pub fn column_heights(&self) -> [usize; GRID_WIDTH] {
        std::array::from_fn(|x| self.column_height(x))
    }

    /// Iterates over the cells of column `x` from top to bottom.
    pub fn column(&self, x: usize) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().map(move |row| row.cells[x])
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; GRID_WIDTH]> {
        self.rows.iter().map(|row| &row.cells)
    }

    /// Iterates over all filled cells as `(x, y, color)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.cells
                .iter()
                .enumerate()
                .filter_map(move |(x, cell)| cell.color().map(|color| (x, y, color)))
        })
    }
}
