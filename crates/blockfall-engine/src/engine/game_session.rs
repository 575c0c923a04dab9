use rand::Rng as _;
use serde::Serialize;
use tracing::{debug, info};

use super::{
    board::{Board, LockReport},
    piece_generator::{PieceGenerator, PieceSeed},
};

/// Who drives the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum PlayMode {
    /// Player commands move the piece.
    Manual,
    /// An autopilot moves the piece; player commands are ignored.
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Player commands accepted in [`PlayMode::Manual`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
}

/// A play session: a [`Board`] with a play mode, pause state and gravity ticks.
///
/// The surrounding loop calls [`GameSession::tick`] at its own pace to apply
/// gravity, and forwards player commands through [`GameSession::apply`].
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    mode: PlayMode,
    paused: bool,
    total_ticks: u64,
    seeds: PieceGenerator,
}

impl GameSession {
    #[must_use]
    pub fn new(mode: PlayMode) -> Self {
        Self::with_seed(mode, rand::rng().random())
    }

    /// Creates a session whose first board and every restarted board are
    /// derived from `seed`.
    #[must_use]
    pub fn with_seed(mode: PlayMode, seed: PieceSeed) -> Self {
        let mut seeds = PieceGenerator::with_seed(seed);
        let board = Board::with_seed(seeds.next_seed());
        Self {
            board,
            mode,
            paused: false,
            total_ticks: 0,
            seeds,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    #[must_use]
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        if self.board.is_game_over() {
            SessionState::GameOver
        } else if self.paused {
            SessionState::Paused
        } else {
            SessionState::Playing
        }
    }

    /// Switches between playing and paused. A finished game stays finished.
    pub fn toggle_pause(&mut self) {
        if self.board.is_game_over() {
            return;
        }
        self.paused = !self.paused;
    }

    /// Advances one gravity step while playing.
    pub fn tick(&mut self) -> Option<LockReport> {
        if !self.session_state().is_playing() {
            return None;
        }
        self.total_ticks += 1;
        let report = self.board.move_piece_down();
        if report.is_some_and(|r| r.game_over) {
            info!(
                score = self.board.score(),
                pieces = self.board.stats().completed_pieces(),
                ticks = self.total_ticks,
                "game over"
            );
        }
        report
    }

    /// Applies a player command. Returns whether the board changed.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.mode.is_auto() || !self.session_state().is_playing() {
            return false;
        }
        match command {
            Command::MoveLeft => self.board.move_piece_left(),
            Command::MoveRight => self.board.move_piece_right(),
            Command::Rotate => self.board.rotate_piece(),
            Command::SoftDrop => {
                self.board.move_piece_down();
                true
            }
            Command::HardDrop => self.board.drop_piece().is_some(),
        }
    }

    /// Gives the autopilot access to the board while an auto session is playing.
    pub fn autopilot_board(&mut self) -> Option<&mut Board> {
        (self.mode.is_auto() && self.session_state().is_playing()).then_some(&mut self.board)
    }

    /// Starts over with a fresh board in the same mode.
    pub fn restart(&mut self) {
        debug!(score = self.board.score(), "restarting session");
        self.board = Board::with_seed(self.seeds.next_seed());
        self.paused = false;
        self.total_ticks = 0;
    }
}
