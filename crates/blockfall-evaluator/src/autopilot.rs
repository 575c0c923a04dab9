//! Step-by-step driver that plays the best move like a player would.
//!
//! Each [`AutoPilot::step`] issues at most one horizontal move: the pilot
//! walks the falling piece toward the target column, then applies the
//! planned rotations once it is aligned. Gravity is left to the caller's
//! tick loop, except in turbo mode where the piece is hard-dropped as soon as
//! the plan is complete.
//!
//! A plan belongs to the piece it was computed for. When the board reports a
//! newly locked piece (for example, gravity locked the piece before the plan
//! finished) the next step plans again for the new piece.

use blockfall_engine::{Board, LockReport};
use tracing::debug;

use crate::turn_evaluator::{BestMove, PlacementSearchError, TurnEvaluator};

/// What a single autopilot step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoPilotAction {
    MovedLeft,
    MovedRight,
    /// The piece could not move toward the target column.
    Blocked,
    /// Planned rotations were applied; `applied` counts those that fit.
    Rotated { applied: u8 },
    /// The piece was hard-dropped (turbo mode).
    Dropped(LockReport),
    /// The plan is complete; waiting for gravity.
    Waiting,
    /// The game is over.
    Idle,
}

#[derive(Debug, Clone, Copy)]
struct Plan {
    piece_number: usize,
    target: BestMove,
    rotated: bool,
}

#[derive(Debug)]
pub struct AutoPilot<'a> {
    turn_evaluator: TurnEvaluator<'a>,
    turbo: bool,
    plan: Option<Plan>,
}

impl<'a> AutoPilot<'a> {
    #[must_use]
    pub fn new(turn_evaluator: TurnEvaluator<'a>, turbo: bool) -> Self {
        Self {
            turn_evaluator,
            turbo,
            plan: None,
        }
    }

    /// The target of the current plan, if one has been made.
    #[must_use]
    pub fn target(&self) -> Option<BestMove> {
        self.plan.map(|plan| plan.target)
    }

    /// Performs one driving step on `board`.
    pub fn step(&mut self, board: &mut Board) -> Result<AutoPilotAction, PlacementSearchError> {
        if board.is_game_over() {
            return Ok(AutoPilotAction::Idle);
        }

        let piece_number = board.stats().completed_pieces();
        let plan = match self.plan {
            Some(plan) if plan.piece_number == piece_number => plan,
            _ => {
                let target = self.turn_evaluator.select_best_move(board)?;
                debug!(
                    piece_number,
                    x = target.x(),
                    rotation = target.rotation(),
                    "planned placement"
                );
                Plan {
                    piece_number,
                    target,
                    rotated: false,
                }
            }
        };
        self.plan = Some(plan);

        let x = board.current_piece().position().x;
        let target_x = plan.target.x();
        if x < target_x {
            return Ok(if board.move_piece_right() {
                AutoPilotAction::MovedRight
            } else {
                AutoPilotAction::Blocked
            });
        }
        if x > target_x {
            return Ok(if board.move_piece_left() {
                AutoPilotAction::MovedLeft
            } else {
                AutoPilotAction::Blocked
            });
        }

        if !plan.rotated {
            let mut applied = 0;
            for _ in 0..plan.target.rotation() {
                if board.rotate_piece() {
                    applied += 1;
                }
            }
            self.plan = Some(Plan {
                rotated: true,
                ..plan
            });
            if !self.turbo {
                return Ok(AutoPilotAction::Rotated { applied });
            }
        }

        if self.turbo {
            return Ok(board
                .drop_piece()
                .map_or(AutoPilotAction::Waiting, AutoPilotAction::Dropped));
        }
        Ok(AutoPilotAction::Waiting)
    }

    /// Steps until the game ends or `turn_limit` pieces are locked.
    ///
    /// Outside turbo mode every step is followed by one row of gravity.
    /// Returns the number of pieces locked during the call.
    pub fn play(
        &mut self,
        board: &mut Board,
        turn_limit: usize,
    ) -> Result<usize, PlacementSearchError> {
        let start = board.stats().completed_pieces();
        while !board.is_game_over() && board.stats().completed_pieces() - start < turn_limit {
            if self.step(board)? == AutoPilotAction::Blocked {
                // Nothing else can move the piece without gravity.
                board.move_piece_down();
            }
            if !self.turbo {
                board.move_piece_down();
            }
        }
        Ok(board.stats().completed_pieces() - start)
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Grid, Piece, PieceColor, PieceKind, PiecePosition, PieceSeed, Rgb};

    use super::*;

    const SEED: PieceSeed = PieceSeed::from_u128(0xa070);

    #[test]
    fn test_walks_to_target_then_rotates() {
        let mut board = Board::with_seed(SEED);
        let piece =
            Piece::new(PieceKind::O, PieceColor::Red).with_position(PiecePosition::new(5, 0));
        board.set_current_piece(piece).unwrap();
        let mut pilot = AutoPilot::new(TurnEvaluator::default(), false);

        let mut actions = Vec::new();
        loop {
            let action = pilot.step(&mut board).unwrap();
            actions.push(action);
            if action == AutoPilotAction::Waiting {
                break;
            }
        }

        assert_eq!(pilot.target().unwrap().x(), 0);
        assert_eq!(
            actions,
            [
                vec![AutoPilotAction::MovedLeft; 5],
                vec![AutoPilotAction::Rotated { applied: 0 }, AutoPilotAction::Waiting],
            ]
            .concat()
        );
        assert_eq!(board.current_piece().position(), PiecePosition::new(0, 0));
        assert_eq!(board.stats().completed_pieces(), 0);
    }

    #[test]
    fn test_turbo_drops_after_alignment() {
        let mut board = Board::with_seed(SEED);
        let mut pilot = AutoPilot::new(TurnEvaluator::default(), true);
        let action = loop {
            let action = pilot.step(&mut board).unwrap();
            if matches!(action, AutoPilotAction::Dropped(_)) {
                break action;
            }
        };
        assert!(matches!(action, AutoPilotAction::Dropped(r) if !r.game_over));
        assert_eq!(board.stats().completed_pieces(), 1);
    }

    #[test]
    fn test_replans_for_new_piece() {
        let mut board = Board::with_seed(SEED);
        let mut pilot = AutoPilot::new(TurnEvaluator::default(), false);
        pilot.step(&mut board).unwrap();
        assert!(pilot.target().is_some());

        // Locking outside the pilot invalidates its plan.
        board.drop_piece().unwrap();
        let expected = TurnEvaluator::default().select_best_move(&board).unwrap();
        pilot.step(&mut board).unwrap();
        assert_eq!(pilot.target(), Some(expected));
    }

    #[test]
    fn test_play_turbo_clears_lines() {
        let mut board = Board::with_seed(SEED);
        let mut pilot = AutoPilot::new(TurnEvaluator::default(), true);
        let turns = pilot.play(&mut board, 200).unwrap();

        assert!(turns > 0);
        assert!(turns <= 200);
        assert_eq!(board.stats().completed_pieces(), turns);
        assert!(board.stats().total_cleared_lines() > 0);
    }

    #[test]
    fn test_idle_after_game_over() {
        let mut grid = Grid::EMPTY;
        for x in 1..Grid::WIDTH {
            grid.set_cell(x, 0, Rgb::new(1, 2, 3));
            grid.set_cell(x, 1, Rgb::new(1, 2, 3));
        }
        let mut board = Board::from_grid(grid, SEED);
        let mut pilot = AutoPilot::new(TurnEvaluator::default(), true);
        assert_eq!(pilot.step(&mut board).unwrap(), AutoPilotAction::Idle);
        assert_eq!(pilot.play(&mut board, 10).unwrap(), 0);
    }
}
