use blockfall_engine::{Board, PieceKind, PieceSeed};
use blockfall_evaluator::turn_evaluator::{BestMove, TurnEvaluator};
use serde::Serialize;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HintArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
}

#[derive(Debug, Clone, Serialize)]
struct Hint {
    seed: PieceSeed,
    kind: PieceKind,
    x: i32,
    rotation: u8,
    score: i32,
    /// Cells the piece occupies after the hard drop.
    landing: Vec<(i32, i32)>,
}

impl Hint {
    fn new(seed: PieceSeed, kind: PieceKind, best: &BestMove) -> Self {
        Self {
            seed,
            kind,
            x: best.x(),
            rotation: best.rotation(),
            score: best.score(),
            landing: best.placement().occupied_positions().collect(),
        }
    }
}

fn hint_for(seed: PieceSeed) -> anyhow::Result<Hint> {
    let board = Board::with_seed(seed);
    let best = TurnEvaluator::default().select_best_move(&board)?;
    Ok(Hint::new(seed, board.current_piece().kind(), &best))
}

pub(crate) fn run(arg: &HintArg) -> anyhow::Result<()> {
    let seed = util::seed_or_random(arg.seed);
    Output::save_json(&hint_for(seed)?, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_lands_on_floor() {
        let hint = hint_for(PieceSeed::from_u128(0x41)).unwrap();
        assert_eq!(hint.landing.len(), 4);
        // First piece on an empty grid always rests on the bottom row.
        assert!(hint.landing.iter().any(|&(_, y)| y == 19));
        assert!(hint.landing.iter().all(|&(x, y)| (0..10).contains(&x) && y <= 19));
        assert_eq!(hint.kind, Board::with_seed(PieceSeed::from_u128(0x41)).current_piece().kind());
    }
}
