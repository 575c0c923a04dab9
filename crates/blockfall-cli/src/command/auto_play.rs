use std::path::PathBuf;

use blockfall_engine::{BoardSnapshot, GameSession, GameStats, PieceSeed, PlayMode};
use blockfall_evaluator::{
    autopilot::AutoPilot, placement_evaluator::HeuristicWeights, turn_evaluator::TurnEvaluator,
};
use serde::Serialize;
use tracing::info;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop after this many pieces have locked
    #[arg(long, default_value_t = 1000)]
    max_turns: usize,
    /// Autopilot steps between two gravity ticks
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    frames_per_drop: u64,
    /// Hard-drop each piece as soon as it is in place
    #[arg(long, default_value_t = false)]
    turbo: bool,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Outcome of one autopilot session.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct SessionReport {
    pub seed: PieceSeed,
    pub turns: usize,
    pub ticks: u64,
    pub score: usize,
    pub stats: GameStats,
    pub game_over: bool,
    pub weights: HeuristicWeights,
    pub final_board: BoardSnapshot,
}

/// Plays one Auto session: an autopilot step every frame, gravity every
/// `frames_per_drop` frames, until game over or `max_turns` locked pieces.
pub(crate) fn play_session(
    seed: PieceSeed,
    max_turns: usize,
    frames_per_drop: u64,
    turbo: bool,
) -> anyhow::Result<SessionReport> {
    let mut session = GameSession::with_seed(PlayMode::Auto, seed);
    let mut pilot = AutoPilot::new(TurnEvaluator::default(), turbo);

    let mut frame: u64 = 0;
    while session.session_state().is_playing()
        && session.board().stats().completed_pieces() < max_turns
    {
        if let Some(board) = session.autopilot_board() {
            pilot.step(board)?;
        }
        frame += 1;
        if frame % frames_per_drop == 0 {
            session.tick();
        }
    }

    let board = session.board();
    let report = SessionReport {
        seed,
        turns: board.stats().completed_pieces(),
        ticks: session.total_ticks(),
        score: board.score(),
        stats: board.stats().clone(),
        game_over: board.is_game_over(),
        weights: HeuristicWeights::DEFAULT,
        final_board: board.snapshot(),
    };
    info!(
        %seed,
        turns = report.turns,
        score = report.score,
        game_over = report.game_over,
        "session finished"
    );
    Ok(report)
}

pub(crate) fn run(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        seed,
        max_turns,
        frames_per_drop,
        turbo,
        output,
    } = arg;

    let seed = util::seed_or_random(*seed);
    let report = play_session(seed, *max_turns, *frames_per_drop, *turbo)?;
    Output::save_json(&report, output.clone())
}
