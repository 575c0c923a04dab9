//! Turn evaluation: selecting the best placement for the current piece.
//!
//! # How It Works
//!
//! 1. **Enumerate Placements** - For each rotation count 0..4 (outer loop) and
//!    each column 0..10 (inner loop), rotate a copy of the current piece,
//!    anchor it at that column on row 0 and skip it if it does not fit there
//! 2. **Hard-Drop** - Move the copy down as far as it fits
//! 3. **Score Each Placement** - Probe the landed piece on a copy of the grid
//!    and score it with the placement evaluator
//! 4. **Select Best** - Keep the highest integer fitness; ties keep the first
//!    candidate in enumeration order
//!
//! The live board is never mutated: probes work on cloned grids.
//!
//! # Design: Greedy One-Step Lookahead
//!
//! Only the current piece is considered; there is no lookahead into future
//! pieces.
//!
//! # Usage
//!
//! ```
//! use blockfall_engine::Board;
//! use blockfall_evaluator::turn_evaluator::TurnEvaluator;
//!
//! let board = Board::new();
//! let best = TurnEvaluator::default().select_best_move(&board).unwrap();
//! println!("move to column {} with {} rotations", best.x(), best.rotation());
//! ```

use arrayvec::ArrayVec;
use blockfall_engine::{Board, Grid, Piece, PiecePosition};
use tracing::{debug, trace};

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{HeuristicEvaluator, PlacementEvaluator},
};

/// Upper bound on candidates: 4 rotations × one anchor per column.
pub const MAX_CANDIDATES: usize = 4 * Grid::WIDTH;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const WIDTH: i32 = Grid::WIDTH as i32;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PlacementSearchError {
    #[display("placement search requested after game over")]
    GameOver,
    #[display("no valid placement for the current piece on a live board")]
    NoValidPlacement,
}

/// A reachable placement: target column, rotation count and landed piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementCandidate {
    x: i32,
    rotation: u8,
    placement: Piece,
}

impl PlacementCandidate {
    /// Target anchor column.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Number of rotations applied to the current piece.
    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// The rotated piece at its hard-drop resting position.
    #[must_use]
    pub fn placement(&self) -> Piece {
        self.placement
    }
}

/// The selected placement and its fitness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    candidate: PlacementCandidate,
    score: i32,
}

impl BestMove {
    #[must_use]
    pub fn x(&self) -> i32 {
        self.candidate.x
    }

    #[must_use]
    pub fn rotation(&self) -> u8 {
        self.candidate.rotation
    }

    #[must_use]
    pub fn placement(&self) -> Piece {
        self.candidate.placement
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Enumerates every placement of the current piece in search order.
#[must_use]
pub fn available_placements(board: &Board) -> ArrayVec<PlacementCandidate, MAX_CANDIDATES> {
    let mut candidates = ArrayVec::new();
    let mut rotated = *board.current_piece();
    for rotation in 0..4 {
        for x in 0..WIDTH {
            if !board.is_piece_fit(&rotated, x, 0) {
                continue;
            }
            let placement = board.drop_position(&rotated.with_position(PiecePosition::new(x, 0)));
            candidates.push(PlacementCandidate {
                x,
                rotation,
                placement,
            });
        }
        rotated.rotate();
    }
    candidates
}

/// Evaluates and selects the best placement for the current piece.
#[derive(Debug)]
pub struct TurnEvaluator<'a> {
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl Default for TurnEvaluator<'_> {
    fn default() -> Self {
        Self::new(Box::new(HeuristicEvaluator::new()))
    }
}

impl<'a> TurnEvaluator<'a> {
    #[must_use]
    pub fn new(placement_evaluator: Box<dyn PlacementEvaluator + 'a>) -> Self {
        Self {
            placement_evaluator,
        }
    }

    /// Scores one candidate placement on `board`.
    #[must_use]
    pub fn evaluate_candidate(&self, board: &Board, candidate: &PlacementCandidate) -> i32 {
        let analysis = PlacementAnalysis::from_board(board, candidate.placement);
        self.placement_evaluator.evaluate_placement(&analysis)
    }

    /// Selects the highest-scoring placement for the current piece.
    ///
    /// Zero candidates on a live board means a piece was spawned where it
    /// cannot exist; this is reported as [`PlacementSearchError::NoValidPlacement`].
    pub fn select_best_move(&self, board: &Board) -> Result<BestMove, PlacementSearchError> {
        if board.is_game_over() {
            return Err(PlacementSearchError::GameOver);
        }

        let mut best: Option<BestMove> = None;
        for candidate in available_placements(board) {
            let score = self.evaluate_candidate(board, &candidate);
            trace!(
                x = candidate.x,
                rotation = candidate.rotation,
                score,
                "evaluated placement"
            );
            if best.is_none_or(|b| score > b.score) {
                best = Some(BestMove { candidate, score });
            }
        }

        let best = best.ok_or(PlacementSearchError::NoValidPlacement)?;
        debug!(
            kind = ?board.current_piece().kind(),
            x = best.x(),
            rotation = best.rotation(),
            score = best.score,
            "selected best move"
        );
        Ok(best)
    }
}
