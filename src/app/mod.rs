//! Terminal runner: one plain-text screen per minigame.
//!
//! Screens are built as strings by pure functions, so they can be tested
//! without a terminal. The loops poll input with a short timeout to keep
//! clocks and the ranking panel fresh.

pub mod logging;
pub mod lotto;
pub mod luck;
pub mod session;
pub mod terminal;
pub mod timer;
pub mod twenty48;

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

use crate::core::timer::format_diff;
use crate::scores::{RankingState, ScoreEntry};
use crate::types::game_names;

pub use session::Session;
pub use terminal::Terminal;

/// Input poll interval
pub const FRAME: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    Twenty48,
    Luck,
    Timer,
    Lotto,
}

impl Game {
    pub fn name(&self) -> &'static str {
        match self {
            Game::Twenty48 => game_names::TWENTY48,
            Game::Luck => game_names::LUCK,
            Game::Timer => game_names::TIMER,
            Game::Lotto => game_names::LOTTO,
        }
    }
}

pub fn run(game: Game, term: &mut Terminal, session: &mut Session) -> Result<()> {
    match game {
        Game::Twenty48 => twenty48::run(term, session),
        Game::Luck => luck::run(term, session),
        Game::Timer => timer::run(term, session),
        Game::Lotto => lotto::run(term, session),
    }
}

pub(crate) enum Input {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Idle,
}

/// Wait up to one frame for a key press or mouse event.
pub(crate) fn next_input() -> Result<Input> {
    if !event::poll(FRAME)? {
        return Ok(Input::Idle);
    }
    Ok(match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Input::Key(key),
        Event::Mouse(mouse) => Input::Mouse(mouse),
        _ => Input::Idle,
    })
}

/// What a ranking row shows for `game`
fn ranking_value(game: Game, entry: &ScoreEntry) -> String {
    match game {
        Game::Twenty48 => entry.max_tile.unwrap_or(0).to_string(),
        Game::Luck => entry.score.to_string(),
        Game::Timer => match entry.time_diff {
            Some(diff) => format_diff(diff),
            None => format!("{}ms", entry.score),
        },
        Game::Lotto => match entry.score {
            0 => "no prize".to_string(),
            rank => format!("prize #{}", rank),
        },
    }
}

/// Ranking panel lines
pub fn write_ranking(out: &mut String, game: Game, ranking: Option<&RankingState>) {
    out.push_str("-- ranking --\n");
    match ranking {
        None => out.push_str("(offline)\n"),
        Some(RankingState::Loading) => out.push_str("loading...\n"),
        Some(RankingState::Unavailable) => out.push_str("ranking unavailable\n"),
        Some(RankingState::Ready(entries)) if entries.is_empty() => {
            out.push_str("no scores yet\n")
        }
        Some(RankingState::Ready(entries)) => {
            for (i, e) in entries.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "{:>2}. {:<20} {}",
                    i + 1,
                    e.nickname,
                    ranking_value(game, e)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> ScoreEntry {
        ScoreEntry {
            nickname: "amy".to_string(),
            score,
            max_tile: None,
            time_diff: None,
            numbers: None,
            match_count: None,
            timestamp: chrono::Utc::now(),
        }
    }

    fn panel(game: Game, entry: ScoreEntry) -> String {
        let mut out = String::new();
        write_ranking(&mut out, game, Some(&RankingState::Ready(vec![entry])));
        out
    }

    #[test]
    fn test_ranking_panel_states() {
        let mut out = String::new();
        write_ranking(&mut out, Game::Luck, None);
        assert!(out.contains("offline"));

        let mut out = String::new();
        write_ranking(&mut out, Game::Luck, Some(&RankingState::Loading));
        assert!(out.contains("loading"));

        let out = panel(Game::Luck, entry(12));
        assert!(out.contains(" 1. amy"));
        assert!(out.trim_end().ends_with("12"));
    }

    #[test]
    fn test_ranking_rows_show_each_games_value() {
        let tile = ScoreEntry {
            max_tile: Some(1024),
            ..entry(9000)
        };
        assert!(panel(Game::Twenty48, tile).trim_end().ends_with("1024"));

        let timer = ScoreEntry {
            time_diff: Some(-0.12),
            ..entry(120)
        };
        assert!(panel(Game::Timer, timer).trim_end().ends_with("-0.12s"));

        assert!(panel(Game::Lotto, entry(2)).trim_end().ends_with("prize #2"));
        assert!(panel(Game::Lotto, entry(0)).trim_end().ends_with("no prize"));
    }

    #[test]
    fn test_game_names() {
        assert_eq!(Game::Twenty48.name(), "2048");
        assert_eq!(Game::Lotto.name(), "lotto");
    }
}
