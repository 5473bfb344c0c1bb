//! Seven-second timer screen.

use std::fmt::Write as _;
use std::time::Instant;

use anyhow::Result;

use crate::app::{next_input, write_ranking, Game, Input, Session, Terminal};
use crate::core::timer::{format_diff, StopwatchGame, TimerResult, TARGET_SECS};
use crate::input::{is_timer_toggle, should_quit};
use crate::scores::{RankingState, SubmitScore};
use crate::types::game_names;

const GAME: &str = game_names::TIMER;

/// Elapsed time stays hidden after this many seconds.
const VISIBLE_SECS: f64 = 3.0;

pub fn run(term: &mut Terminal, session: &mut Session) -> Result<()> {
    let mut game = StopwatchGame::new();
    let mut last: Option<TimerResult> = None;
    session.request_ranking(GAME);

    loop {
        let elapsed = game.elapsed(Instant::now()).map(|d| d.as_secs_f64());
        let ranking = session.ranking();
        term.draw(&screen(elapsed, last, ranking.as_ref()))?;

        let key = match next_input()? {
            Input::Key(key) => key,
            _ => continue,
        };
        if should_quit(key) {
            return Ok(());
        }
        if !is_timer_toggle(key) {
            continue;
        }

        // Starting clears the previous result.
        last = game.toggle(Instant::now());
        if let Some(result) = last {
            let submit = submission(session, &result);
            session.submit(GAME, submit);
            session.request_ranking(GAME);
        }
    }
}

/// Ranked by the error in milliseconds; the signed diff rides along for display.
fn submission(session: &Session, result: &TimerResult) -> SubmitScore {
    session
        .submission(result.error_millis())
        .with_time_diff(result.diff_secs)
}

/// `elapsed` is set while the clock runs.
pub fn screen(
    elapsed: Option<f64>,
    last: Option<TimerResult>,
    ranking: Option<&RankingState>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "SEVEN SECONDS - stop the clock at {:.0}s\n", TARGET_SECS);

    match elapsed {
        Some(secs) if secs < VISIBLE_SECS => {
            let _ = writeln!(out, "{:.2}s", secs);
        }
        Some(_) => out.push_str("?.??s\n"),
        None => out.push_str("0.00s\n"),
    }
    out.push('\n');

    if let Some(result) = last {
        let grade = result.grade();
        let _ = writeln!(
            out,
            "{:.2}s ({})  {} {}",
            result.elapsed_secs,
            format_diff(result.diff_secs),
            grade.title(),
            grade.message()
        );
        out.push('\n');
    }

    write_ranking(&mut out, Game::Timer, ranking);
    if elapsed.is_some() {
        out.push_str("\nspace: stop  q: quit\n");
    } else {
        out.push_str("\nspace: start  q: quit\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::ProfileStore;
    use std::time::Duration;

    #[test]
    fn test_clock_hides_after_three_seconds() {
        assert!(screen(Some(1.5), None, None).contains("1.50s"));
        assert!(screen(Some(4.0), None, None).contains("?.??s"));
        assert!(screen(Some(4.0), None, None).contains("space: stop"));
    }

    #[test]
    fn test_result_line() {
        let result = TimerResult::from_elapsed(Duration::from_millis(6_700));
        let text = screen(None, Some(result), Some(&RankingState::Unavailable));
        assert!(text.contains("6.70s (-0.30s)"));
        assert!(text.contains("Well done!"));
        assert!(text.contains("ranking unavailable"));
    }

    #[test]
    fn test_submission_ranks_by_error_and_keeps_sign() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(ProfileStore::new(dir.path().join("p.json")), None, None);
        let result = TimerResult::from_elapsed(Duration::from_millis(6_700));

        let submit = submission(&session, &result);
        assert_eq!(submit.nickname, session.nickname());
        assert_eq!(submit.score, 300.0);
        assert!(submit.time_diff.is_some_and(|d| (d + 0.3).abs() < 1e-9));
        assert!(submit.validate().is_ok());
    }
}
