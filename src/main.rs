//! Terminal arcade runner (default binary).
//!
//! Plays one minigame per invocation. Scores are submitted to the score server
//! named by `SCORES_URL` unless `SCORES_DISABLED` is set.

use anyhow::Result;
use clap::{Parser, Subcommand};

use luck_arcade::app::{self, logging, Game, Session, Terminal};
use luck_arcade::scores::{ProfileStore, ScoreReporter};

#[derive(Parser, Debug)]
#[command(name = "luck-arcade", version, about = "Casual luck minigames in the terminal")]
struct Args {
    #[command(subcommand)]
    game: Option<GameArg>,
    /// Nickname shown in the ranking (saved to the profile).
    #[arg(long, short)]
    nickname: Option<String>,
    /// Seed for a reproducible game.
    #[arg(long)]
    seed: Option<u32>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum GameArg {
    /// Slide and merge tiles (default)
    #[command(name = "2048")]
    Twenty48,
    /// Pick left or right as long as your luck holds
    Luck,
    /// Stop the clock at exactly seven seconds
    Timer,
    /// Today's 6/45 lotto draw
    Lotto,
}

impl From<GameArg> for Game {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Twenty48 => Game::Twenty48,
            GameArg::Luck => Game::Luck,
            GameArg::Timer => Game::Timer,
            GameArg::Lotto => Game::Lotto,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let logs = logging::init_from_env();

    let game = args.game.map(Game::from).unwrap_or(Game::Twenty48);
    let mut session = Session::new(
        ProfileStore::from_env(),
        ScoreReporter::start_from_env(),
        args.seed,
    );
    if let Some(name) = args.nickname.as_deref() {
        session.set_nickname(name)?;
    }
    tracing::info!(game = game.name(), nickname = session.nickname(), "starting");

    let mut term = Terminal::new();
    term.enter()?;
    let result = app::run(game, &mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.close();
    if let Some(logs) = logs {
        logs.dump_to_stderr();
    }
    result
}
