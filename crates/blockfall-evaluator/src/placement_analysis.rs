//! Analysis of a board as it would look after a placement.
//!
//! [`PlacementAnalysis`] probes a landed piece on a copy of the grid (no
//! line clear) and records the resulting [`BoardAnalysis`] together with the
//! board's cumulative score, which the heuristic fitness also reads.

use blockfall_engine::{Board, Piece};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct PlacementAnalysis {
    placement: Piece,
    score: usize,
    board_analysis: BoardAnalysis,
}

impl PlacementAnalysis {
    /// Analyzes `board` with `placement` written onto a copy of its grid.
    #[must_use]
    pub fn from_board(board: &Board, placement: Piece) -> Self {
        let grid = board.probe_placement(&placement);
        Self {
            placement,
            score: board.score(),
            board_analysis: BoardAnalysis::from_grid(&grid),
        }
    }

    /// Analyzes `board` as it currently is, without any placement.
    #[must_use]
    pub fn current(board: &Board) -> Self {
        Self {
            placement: *board.current_piece(),
            score: board.score(),
            board_analysis: BoardAnalysis::from_grid(board.grid()),
        }
    }

    #[must_use]
    pub fn placement(&self) -> &Piece {
        &self.placement
    }

    /// Cumulative score of the board the placement was probed on.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }
}
