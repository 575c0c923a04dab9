use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use self::{auto_play::AutoPlayArg, batch::BatchArg, hint::HintArg};

mod auto_play;
mod batch;
mod hint;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play one session with the autopilot and report the result
    AutoPlay(#[clap(flatten)] AutoPlayArg),
    /// Play several turbo sessions and summarize their scores
    Batch(#[clap(flatten)] BatchArg),
    /// Print the best move for the first piece of a fresh board
    Hint(#[clap(flatten)] HintArg),
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    tracing_subscriber::fmt()
        .with_max_level(log_level(args.verbose))
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match args.mode {
        Mode::AutoPlay(arg) => auto_play::run(&arg)?,
        Mode::Batch(arg) => batch::run(&arg)?,
        Mode::Hint(arg) => hint::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(log_level(0), Level::WARN);
        assert_eq!(log_level(1), Level::INFO);
        assert_eq!(log_level(2), Level::DEBUG);
        assert_eq!(log_level(7), Level::TRACE);
    }

    #[test]
    fn test_parse_auto_play_flags() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "-vv",
            "auto-play",
            "--seed",
            "000000000000000000000000000000ff",
            "--turbo",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(args.mode, Mode::AutoPlay(_)));
    }

    #[test]
    fn test_reject_malformed_seed() {
        let result = CommandArgs::try_parse_from(["blockfall", "hint", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
