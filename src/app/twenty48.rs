//! 2048 screen.

use std::fmt::Write as _;

use anyhow::Result;

use crate::app::{next_input, write_ranking, Game, Input, Session, Terminal};
use crate::core::{GameSnapshot, GameState, SimpleRng};
use crate::input::{handle_key_event, should_quit, SwipeTracker};
use crate::scores::RankingState;
use crate::types::{game_names, GameAction, Position, GRID_SIZE};

const GAME: &str = game_names::TWENTY48;

pub fn run(term: &mut Terminal, session: &mut Session) -> Result<()> {
    let best = session.best(GAME).min(u32::MAX as u64) as u32;
    let mut game: GameState<SimpleRng> = GameState::with_rng(session.rng()).with_best_score(best);
    let mut swipe = SwipeTracker::new();
    let mut snapshot = GameSnapshot::default();
    let mut new_record = false;
    session.request_ranking(GAME);

    loop {
        game.snapshot_into(&mut snapshot);
        let ranking = session.ranking();
        let frame = screen(&snapshot, session.nickname(), ranking.as_ref(), new_record);
        term.draw(&frame)?;

        let action = match next_input()? {
            Input::Key(key) if should_quit(key) => return Ok(()),
            Input::Key(key) => handle_key_event(key),
            Input::Mouse(mouse) => swipe.handle_mouse_event(mouse).map(GameAction::from_direction),
            Input::Idle => None,
        };
        if let Some(action) = action {
            play(&mut game, session, action, &mut new_record);
        }
    }
}

/// Apply one action. A beaten best is saved right away so quitting mid-game
/// keeps it; the board only hears about finished games.
fn play(
    game: &mut GameState<SimpleRng>,
    session: &mut Session,
    action: GameAction,
    new_record: &mut bool,
) {
    if action == GameAction::Restart {
        *new_record = false;
    }
    let Some(result) = game.apply_action(action) else {
        return;
    };
    if !result.moved {
        return;
    }
    if session.record_best(GAME, game.best_score() as u64) {
        *new_record = true;
    }
    // Only the move that ends the game submits; later keys report game_over too.
    if result.game_over {
        if let Some(done) = game.final_result() {
            let submission = session.submission(done.score as u64).with_max_tile(done.max_tile);
            session.submit(GAME, submission);
            session.request_ranking(GAME);
        }
    }
}

/// Render one frame. New tiles carry `*`, merged tiles carry `+`.
pub fn screen(
    snap: &GameSnapshot,
    nickname: &str,
    ranking: Option<&RankingState>,
    new_record: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "2048  player: {}", nickname);
    let _ = writeln!(
        out,
        "score: {}  best: {}  moves: {}",
        snap.score, snap.best_score, snap.moves
    );
    out.push('\n');

    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let pos = Position::new(r as u8, c as u8);
            let v = snap.grid[r][c];
            let mark = if snap.is_new(pos) {
                '*'
            } else if snap.is_merged(pos) {
                '+'
            } else {
                ' '
            };
            if v == 0 {
                let _ = write!(out, "{:>5}{}", ".", mark);
            } else {
                let _ = write!(out, "{:>5}{}", v, mark);
            }
        }
        out.push('\n');
    }
    out.push('\n');

    if snap.game_over {
        let result = crate::core::GameResult {
            score: snap.score,
            max_tile: snap.max_tile,
        };
        let tier = result.tier();
        let _ = writeln!(out, "GAME OVER - {} {}", tier.title(), tier.message());
        let _ = writeln!(out, "final score {}, max tile {}", snap.score, snap.max_tile);
        if new_record {
            out.push_str("new personal best!\n");
        }
        out.push('\n');
    }

    write_ranking(&mut out, Game::Twenty48, ranking);
    if snap.game_over {
        out.push_str("\nr: new game  q: quit\n");
    } else {
        out.push_str("\narrows/WASD or drag: move  r: restart  q: quit\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Grid;
    use crate::scores::ProfileStore;
    use crate::types::Direction;

    #[test]
    fn test_screen_marks_spawn_and_merge() {
        let grid = Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut game = GameState::from_grid(grid, SimpleRng::new(3));
        let result = game.apply_move(Direction::Left);
        assert!(result.moved);

        let snap = game.snapshot();
        let text = screen(&snap, "amy", None, false);
        assert!(text.contains("    4+"));
        assert!(text.contains('*'));
        assert!(text.contains("score: 4"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_screen_game_over_shows_ranking() {
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let game = GameState::from_grid(grid, SimpleRng::new(1));
        let snap = game.snapshot();
        assert!(snap.game_over);

        let text = screen(&snap, "amy", Some(&RankingState::Unavailable), true);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("new personal best"));
        assert!(text.contains("ranking unavailable"));
    }

    #[test]
    fn test_beaten_best_is_saved_before_game_over() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("p.json"));
        let mut session = Session::new(store.clone(), None, Some(1));

        let grid = Grid::from_rows([[2, 2, 4, 4], [0; 4], [0; 4], [0; 4]]);
        let mut game = GameState::from_grid(grid, SimpleRng::new(5));
        let mut new_record = false;
        play(&mut game, &mut session, GameAction::MoveLeft, &mut new_record);

        assert!(!game.is_game_over());
        assert!(new_record);
        assert_eq!(store.load().unwrap().best(GAME), 12);

        // Restarting keeps the saved best and clears the banner.
        play(&mut game, &mut session, GameAction::Restart, &mut new_record);
        assert!(!new_record);
        assert_eq!(store.load().unwrap().best(GAME), 12);
    }

    #[test]
    fn test_keys_after_game_over_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("p.json"));
        let mut session = Session::new(store.clone(), None, None);

        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let mut game = GameState::from_grid(grid, SimpleRng::new(1));
        let mut new_record = false;
        play(&mut game, &mut session, GameAction::MoveLeft, &mut new_record);

        assert!(game.is_game_over());
        assert!(!new_record);
        assert_eq!(store.load().unwrap().best(GAME), 0);
    }

    #[test]
    fn test_ranking_shows_during_play() {
        let game = GameState::new(9);
        let text = screen(&game.snapshot(), "amy", Some(&RankingState::Loading), false);
        assert!(text.contains("-- ranking --"));
        assert!(text.contains("loading"));
    }
}
