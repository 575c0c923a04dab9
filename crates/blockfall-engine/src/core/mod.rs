//! Core data structures: piece geometry and the cell grid.
//!
//! - [`Piece`] - A tetromino's four block offsets, color and anchor position
//! - [`Grid`] - The 10×20 cell matrix with line-clear primitives

pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;
