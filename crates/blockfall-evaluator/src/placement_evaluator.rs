//! Placement evaluation: scoring individual piece placements.
//!
//! # Design: Fixed Linear Weighted Sum
//!
//! The [`HeuristicEvaluator`] computes a placement's fitness as:
//!
//! ```text
//! fitness = trunc(-0.5·aggregate_height + 0.76·score - 0.35·holes - 0.18·bumpiness)
//! ```
//!
//! The weighted sum is computed in `f64` and truncated toward zero to an
//! integer, so placements whose sums fall in the same integer bucket tie.
//! The weights are the constants in [`HeuristicWeights::DEFAULT`]; they are
//! not configurable at runtime.
//!
//! `score` is the board's cumulative session score, not the points the
//! placement itself would earn (the probe runs no line clear). The same offset
//! is added to every candidate of one search, but because of the truncation it
//! moves the bucket edges: two placements that tie at score 0 can separate
//! once the score is nonzero, so the game history can change the chosen
//! placement.

use std::fmt;

use blockfall_engine::Board;
use serde::Serialize;

use crate::placement_analysis::PlacementAnalysis;

/// Evaluates piece placements by assigning scores (higher is better).
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> i32;
}

/// Weights of the heuristic fitness function.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeuristicWeights {
    pub aggregate_height: f64,
    pub score: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl HeuristicWeights {
    pub const DEFAULT: Self = Self {
        aggregate_height: -0.5,
        score: 0.76,
        holes: -0.35,
        bumpiness: -0.18,
    };

    /// Weighted sum of the raw metrics, truncated toward zero.
    #[must_use]
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn fitness(
        &self,
        aggregate_height: usize,
        score: usize,
        holes: usize,
        bumpiness: usize,
    ) -> i32 {
        let sum = self.aggregate_height * aggregate_height as f64
            + self.score * score as f64
            + self.holes * holes as f64
            + self.bumpiness * bumpiness as f64;
        sum.trunc() as i32
    }
}

/// Placement evaluator using the fixed heuristic weights.
#[derive(Debug, Clone, Default)]
pub struct HeuristicEvaluator {
    weights: HeuristicWeights,
}

impl HeuristicEvaluator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PlacementEvaluator for HeuristicEvaluator {
    #[inline]
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> i32 {
        let board = analysis.board_analysis();
        self.weights.fitness(
            board.aggregate_height(),
            analysis.score(),
            board.num_holes(),
            board.bumpiness(),
        )
    }
}

/// Fitness of the board as it currently stands, with the default weights.
#[must_use]
pub fn evaluate_board(board: &Board) -> i32 {
    HeuristicEvaluator::new().evaluate_placement(&PlacementAnalysis::current(board))
}
