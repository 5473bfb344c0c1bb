//! Daily lotto screen.
//!
//! Type a number and press Enter to toggle it on the ticket. With six numbers
//! picked, Enter on an empty entry checks the ticket against today's draw.
//! Each nickname gets one ticket per day; coming back the same day shows the
//! ticket already played and the countdown to the next draw.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::{Datelike, Local, Timelike};
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{next_input, write_ranking, Game, Input, Session, Terminal};
use crate::core::lotto::{
    day_seed, format_countdown, seconds_until_midnight, BallBand, CheckResult, Draw, Prize,
    Ticket, TicketChange, PICKS,
};
use crate::core::SimpleRng;
use crate::input::{lotto_digit, should_quit};
use crate::scores::{daily_game_name, LottoPlay, RankingState};
use crate::types::game_names;

/// Ticket being filled in, plus the typed digits (at most two)
#[derive(Debug, Default)]
pub struct LottoScreen {
    pub ticket: Ticket,
    pub entry: String,
    pub status: String,
    pub checked: Option<CheckResult>,
    /// Reopened on a day the ticket was already played
    pub already_played: bool,
}

impl LottoScreen {
    /// Show a ticket played earlier today; no further picks are taken.
    pub fn already_played(play: &LottoPlay) -> Self {
        let mut ticket = Ticket::new();
        for &n in &play.numbers {
            ticket.toggle(n);
        }
        Self {
            ticket,
            checked: Some(CheckResult {
                matches: play.matches as usize,
                has_bonus: false,
                prize: Prize::from_rank(play.rank),
            }),
            already_played: true,
            ..Self::default()
        }
    }

    /// Handle one key. Returns the result when this key checked the ticket.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        draw: &Draw,
        rng: &mut SimpleRng,
    ) -> Option<CheckResult> {
        if self.checked.is_some() {
            return None;
        }

        if let Some(d) = lotto_digit(key) {
            if self.entry.len() < 2 {
                self.entry.push(char::from(b'0' + d));
            }
            return None;
        }

        match key.code {
            KeyCode::Backspace => {
                self.entry.pop();
            }
            KeyCode::Enter if !self.entry.is_empty() => {
                let n: u8 = self.entry.parse().unwrap_or(0);
                self.entry.clear();
                self.status = match self.ticket.toggle(n) {
                    TicketChange::Added => format!("added {}", n),
                    TicketChange::Removed => format!("removed {}", n),
                    TicketChange::Full => format!("only {} numbers per ticket", PICKS),
                    TicketChange::OutOfRange => "pick 1 to 45".to_string(),
                };
            }
            KeyCode::Enter if self.ticket.is_complete() => {
                let result = draw.check(&self.ticket);
                self.checked = Some(result);
                self.status.clear();
                return Some(result);
            }
            KeyCode::Enter => {
                self.status = format!("pick {} numbers first", PICKS);
            }
            KeyCode::Char('p' | 'P') => {
                self.ticket.quick_pick(rng);
                self.status = "quick pick".to_string();
            }
            KeyCode::Char('c' | 'C') => {
                self.ticket.clear();
                self.status = "ticket cleared".to_string();
            }
            _ => {}
        }
        None
    }

    pub fn render(
        &self,
        draw: &Draw,
        countdown_secs: u32,
        ranking: Option<&RankingState>,
    ) -> String {
        let mut out = String::new();
        out.push_str("DAILY LOTTO 6/45\n\n");
        if self.already_played {
            out.push_str("you already played today, come back after midnight\n\n");
        }
        out.push_str("ticket: ");
        write_balls(&mut out, self.ticket.numbers());
        for _ in self.ticket.numbers().len()..PICKS {
            out.push_str("[  ] ");
        }
        out.push('\n');
        let _ = writeln!(out, "number: {}_", self.entry);
        if !self.status.is_empty() {
            let _ = writeln!(out, "{}", self.status);
        }
        out.push('\n');

        if let Some(result) = self.checked {
            out.push_str("draw:   ");
            write_balls(&mut out, &draw.numbers);
            out.push_str(" + ");
            write_balls(&mut out, &[draw.bonus]);
            out.push('\n');
            let bonus = if result.has_bonus { " + bonus" } else { "" };
            match result.prize {
                Some(prize) => {
                    let _ = writeln!(
                        out,
                        "{} matches{} - prize #{}!",
                        result.matches,
                        bonus,
                        prize.rank()
                    );
                }
                None => {
                    let _ = writeln!(out, "{} matches{} - no prize this time", result.matches, bonus);
                }
            }
        }
        let _ = writeln!(out, "next draw in {}\n", format_countdown(countdown_secs));

        write_ranking(&mut out, Game::Lotto, ranking);
        if self.checked.is_some() {
            out.push_str("\nq: quit\n");
        } else {
            out.push_str("\ndigits+enter: toggle  p: quick pick  c: clear  enter: check  q: quit\n");
        }
        out
    }
}

fn band_tag(n: u8) -> char {
    match BallBand::for_number(n) {
        BallBand::Yellow => 'y',
        BallBand::Blue => 'b',
        BallBand::Red => 'r',
        BallBand::Gray => 'g',
        BallBand::Green => 'G',
    }
}

fn write_balls(out: &mut String, numbers: &[u8]) {
    for (i, &n) in numbers.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "[{:>2}{}]", n, band_tag(n));
    }
    if !numbers.is_empty() {
        out.push(' ');
    }
}

pub fn run(term: &mut Terminal, session: &mut Session) -> Result<()> {
    let today = Local::now();
    let day = day_seed(today.year(), today.month(), today.day());
    let draw = Draw::for_day(day);
    let board = daily_game_name(game_names::LOTTO, day);
    let mut rng = session.rng();
    let mut state = match session.lotto_played(day) {
        Some(play) => LottoScreen::already_played(play),
        None => LottoScreen::default(),
    };
    session.request_ranking(&board);

    loop {
        let countdown = seconds_until_midnight(Local::now().num_seconds_from_midnight());
        let ranking = session.ranking();
        term.draw(&state.render(&draw, countdown, ranking.as_ref()))?;

        if let Input::Key(key) = next_input()? {
            if should_quit(key) {
                return Ok(());
            }
            if let Some(result) = state.handle_key(key, &draw, &mut rng) {
                finish(session, day, &state.ticket, &result);
                session.request_ranking(&board);
            }
        }
    }
}

/// Remember today's ticket and send it to the day's board.
fn finish(session: &mut Session, day: u32, ticket: &Ticket, result: &CheckResult) {
    let matches = result.matches as u8;
    let nickname = session.nickname().to_string();
    session.record_lotto_play(LottoPlay {
        day,
        nickname,
        numbers: ticket.numbers().to_vec(),
        rank: result.rank(),
        matches,
    });
    let submission = session
        .submission(result.rank() as u64)
        .with_ticket(ticket.numbers(), matches);
    session.submit(&daily_game_name(game_names::LOTTO, day), submission);
}
