use std::path::PathBuf;

use blockfall_engine::{PieceGenerator, PieceSeed};
use serde::Serialize;
use tracing::info;

use crate::{
    command::auto_play::play_session,
    util::{self, Output},
};

/// Steps per gravity tick in batch sessions; turbo drops make it irrelevant
/// for anything but blocked pieces.
const FRAMES_PER_DROP: u64 = 1;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BatchArg {
    /// Number of sessions to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Base seed from which per-game seeds are derived (random if omitted)
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Stop each session after this many pieces have locked
    #[arg(long, default_value_t = 1000)]
    max_turns: usize,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct GameSummary {
    seed: PieceSeed,
    turns: usize,
    score: usize,
    cleared_lines: usize,
    game_over: bool,
}

#[derive(Debug, Clone, Serialize)]
struct BatchSummary {
    base_seed: PieceSeed,
    max_turns: usize,
    games: Vec<GameSummary>,
    mean_score: f64,
    max_score: usize,
    mean_turns: f64,
}

impl BatchSummary {
    #[expect(clippy::cast_precision_loss)]
    fn new(base_seed: PieceSeed, max_turns: usize, games: Vec<GameSummary>) -> Self {
        let count = games.len().max(1) as f64;
        let mean_score = games.iter().map(|g| g.score).sum::<usize>() as f64 / count;
        let mean_turns = games.iter().map(|g| g.turns).sum::<usize>() as f64 / count;
        let max_score = games.iter().map(|g| g.score).max().unwrap_or(0);
        Self {
            base_seed,
            max_turns,
            games,
            mean_score,
            max_score,
            mean_turns,
        }
    }
}

fn play_batch(
    base_seed: PieceSeed,
    games: usize,
    max_turns: usize,
) -> anyhow::Result<BatchSummary> {
    let mut seeds = PieceGenerator::with_seed(base_seed);
    let mut summaries = Vec::with_capacity(games);
    for game in 0..games {
        let seed = seeds.next_seed();
        let report = play_session(seed, max_turns, FRAMES_PER_DROP, true)?;
        info!(game, score = report.score, turns = report.turns, "game finished");
        summaries.push(GameSummary {
            seed,
            turns: report.turns,
            score: report.score,
            cleared_lines: report.stats.total_cleared_lines(),
            game_over: report.game_over,
        });
    }
    Ok(BatchSummary::new(base_seed, max_turns, summaries))
}

pub(crate) fn run(arg: &BatchArg) -> anyhow::Result<()> {
    let BatchArg {
        games,
        seed,
        max_turns,
        output,
    } = arg;

    let base_seed = util::seed_or_random(*seed);
    let summary = play_batch(base_seed, *games, *max_turns)?;
    eprintln!(
        "Played {} games: mean score {:.1}, max score {}",
        summary.games.len(),
        summary.mean_score,
        summary.max_score
    );
    Output::save_json(&summary, output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_statistics() {
        let game = |score, turns| GameSummary {
            seed: PieceSeed::from_u128(0),
            turns,
            score,
            cleared_lines: 0,
            game_over: true,
        };
        let summary = BatchSummary::new(
            PieceSeed::from_u128(0),
            100,
            vec![game(100, 10), game(300, 20), game(800, 30)],
        );
        assert!((summary.mean_score - 400.0).abs() < 1e-9);
        assert!((summary.mean_turns - 20.0).abs() < 1e-9);
        assert_eq!(summary.max_score, 800);
    }

    #[test]
    fn test_empty_batch() {
        let summary = BatchSummary::new(PieceSeed::from_u128(0), 100, Vec::new());
        assert!(summary.mean_score.abs() < f64::EPSILON);
        assert_eq!(summary.max_score, 0);
    }

    #[test]
    fn test_games_use_distinct_derived_seeds() {
        let summary = play_batch(PieceSeed::from_u128(0xba7c), 3, 20).unwrap();
        assert_eq!(summary.games.len(), 3);
        assert_ne!(summary.games[0].seed, summary.games[1].seed);
        assert_ne!(summary.games[1].seed, summary.games[2].seed);
        assert!(summary.games.iter().all(|g| g.turns <= 20));

        let again = play_batch(PieceSeed::from_u128(0xba7c), 3, 20).unwrap();
        assert_eq!(summary.games[2].seed, again.games[2].seed);
        assert_eq!(summary.games[2].score, again.games[2].score);
    }
}
