//! Luck-streak screen.

use std::fmt::Write as _;

use anyhow::Result;

use crate::app::{next_input, write_ranking, Game, Input, Session, Terminal};
use crate::core::luck::{cheer, format_probability, LuckGame, LuckOutcome, LuckTier};
use crate::input::{luck_choice, should_quit};
use crate::scores::RankingState;
use crate::types::{game_names, Side};

const GAME: &str = game_names::LUCK;

pub fn run(term: &mut Terminal, session: &mut Session) -> Result<()> {
    let mut rng = session.rng();
    let mut game = LuckGame::new();
    let mut last: Option<LuckOutcome> = None;
    let mut message = String::new();
    session.request_ranking(GAME);

    loop {
        let ranking = session.ranking();
        let frame = screen(&game, last, &message, ranking.as_ref());
        term.draw(&frame)?;

        let key = match next_input()? {
            Input::Key(key) => key,
            _ => continue,
        };
        if should_quit(key) {
            return Ok(());
        }

        if game.finished() {
            if matches!(key.code, crossterm::event::KeyCode::Char('r' | 'R')) {
                game.restart();
                last = None;
                message.clear();
            }
            continue;
        }

        let Some(pick) = luck_choice(key) else {
            continue;
        };
        let Some(outcome) = game.choose(pick, &mut rng) else {
            continue;
        };
        last = Some(outcome);
        match outcome {
            LuckOutcome::Hit { streak } => {
                message = match &ranking {
                    Some(RankingState::Ready(entries)) => cheer(
                        streak,
                        session.nickname(),
                        entries.iter().map(|e| (e.nickname.as_str(), e.score)),
                    ),
                    _ => cheer(streak, session.nickname(), std::iter::empty()),
                };
            }
            LuckOutcome::Miss { streak, .. } => {
                message.clear();
                if game.should_submit() {
                    session.finish(GAME, streak as u64);
                }
                session.request_ranking(GAME);
            }
        }
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Left => "LEFT",
        Side::Right => "RIGHT",
    }
}

pub fn screen(
    game: &LuckGame,
    last: Option<LuckOutcome>,
    message: &str,
    ranking: Option<&RankingState>,
) -> String {
    let mut out = String::new();
    out.push_str("LUCK STREAK - pick the winning side\n\n");
    let _ = writeln!(out, "streak: {}", game.streak());
    if let Some(p) = format_probability(game.streak()) {
        let _ = writeln!(out, "odds of getting here: {}", p);
    }
    out.push('\n');

    match last {
        Some(LuckOutcome::Hit { .. }) => {
            let _ = writeln!(out, "correct! {}", message);
        }
        Some(LuckOutcome::Miss { streak, answer }) => {
            let tier = LuckTier::for_streak(streak);
            let _ = writeln!(out, "wrong, it was {}.", side_label(answer));
            let _ = writeln!(out, "{} final streak {}", tier.title(), streak);
        }
        None => out.push_str("[1/left]   or   [2/right]\n"),
    }
    out.push('\n');

    write_ranking(&mut out, Game::Luck, ranking);
    if game.finished() {
        out.push_str("\nr: play again  q: quit\n");
    } else {
        out.push_str("\nleft/right: pick  q: quit\n");
    }
    out
}
