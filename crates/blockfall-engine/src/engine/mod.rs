//! Game engine logic and state management.
//!
//! This module builds gameplay on top of the core data structures:
//!
//! - [`Board`] - Grid plus falling piece: movement, locking, line clears, game over
//! - [`GameStats`] - Score and line-clear statistics
//! - [`PieceGenerator`] - Seeded uniform piece generation
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`BoardSnapshot`] - Read-only view for drawing and reports
//! - [`GameSession`] - Play mode, pause and gravity ticks around a board
//!
//! # Game Flow
//!
//! 1. Construct a [`Board`]; it spawns the first piece immediately
//! 2. Move, rotate and drop the falling piece
//! 3. A locked piece clears full rows, scores, and the next piece spawns
//! 4. Repeat until a spawned piece does not fit (game over)
//!
//! # Example
//!
//! ```
//! use blockfall_engine::Board;
//!
//! let mut board = Board::new();
//!
//! while !board.is_game_over() {
//!     board.move_piece_right();
//!     board.drop_piece();
//! }
//!
//! println!("Final score: {}", board.score());
//! ```

pub use self::{board::*, game_session::*, game_stats::*, piece_generator::*, snapshot::*};

mod board;
mod game_session;
mod game_stats;
mod piece_generator;
mod snapshot;
