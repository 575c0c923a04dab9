//! Heuristic placement search for the blockfall engine.
//!
//! The crate is layered the same way a move is chosen:
//!
//! ```text
//! AutoPilot (drive the falling piece toward a target)
//!     ↓ uses
//! Turn Evaluation (enumerate placements, select the best)
//!     ↓ uses
//! Placement Evaluation (score one probed placement)
//!     ↓ uses
//! Board Analysis (heights, holes, bumpiness)
//! ```
//!
//! - [`board_analysis`] - Pure shape metrics of a grid
//! - [`placement_analysis`] - Metrics of a grid with one landed piece probed onto a copy
//! - [`placement_evaluator`] - Fixed linear fitness over those metrics
//! - [`turn_evaluator`] - Greedy one-step search over every rotation and column
//! - [`autopilot`] - Step-wise driver that plays the selected move on a live board
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Board, PieceSeed};
//! use blockfall_evaluator::{autopilot::AutoPilot, turn_evaluator::TurnEvaluator};
//!
//! let mut board = Board::with_seed(PieceSeed::from_u128(42));
//! let mut pilot = AutoPilot::new(TurnEvaluator::default(), true);
//! let turns = pilot.play(&mut board, 50).unwrap();
//! assert!(turns <= 50);
//! ```

pub mod autopilot;
pub mod board_analysis;
pub mod placement_analysis;
pub mod placement_evaluator;
pub mod turn_evaluator;
