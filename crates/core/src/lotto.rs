//! Daily lotto: pick six numbers out of 45 and match them against today's draw.
//!
//! The draw is seeded from the calendar date, so everyone playing on the same
//! day sees the same winning numbers.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;

pub const MIN_NUMBER: u8 = 1;
pub const MAX_NUMBER: u8 = 45;
pub const PICKS: usize = 6;

const SECS_PER_DAY: u32 = 24 * 60 * 60;

/// Result of toggling one number on a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketChange {
    Added,
    Removed,
    /// Six numbers are already picked
    Full,
    OutOfRange,
}

/// Up to six distinct picks, kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ticket {
    numbers: ArrayVec<u8, PICKS>,
}

impl Ticket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    pub fn contains(&self, n: u8) -> bool {
        self.numbers.contains(&n)
    }

    pub fn is_complete(&self) -> bool {
        self.numbers.is_full()
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
    }

    pub fn toggle(&mut self, n: u8) -> TicketChange {
        if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
            return TicketChange::OutOfRange;
        }
        if let Some(idx) = self.numbers.iter().position(|&x| x == n) {
            self.numbers.remove(idx);
            return TicketChange::Removed;
        }
        if self.numbers.is_full() {
            return TicketChange::Full;
        }
        let at = self.numbers.partition_point(|&x| x < n);
        self.numbers.insert(at, n);
        TicketChange::Added
    }

    /// Fill the remaining slots with random distinct numbers.
    pub fn quick_pick(&mut self, rng: &mut SimpleRng) {
        let mut pool: ArrayVec<u8, { MAX_NUMBER as usize }> = (MIN_NUMBER..=MAX_NUMBER)
            .filter(|n| !self.contains(*n))
            .collect();
        rng.shuffle(&mut pool);
        for n in pool {
            if self.is_complete() {
                break;
            }
            self.toggle(n);
        }
    }
}

/// `yyyymmdd` as a number, e.g. 20261019
pub fn day_seed(year: i32, month: u32, day: u32) -> u32 {
    (year.max(0) as u32) * 10_000 + month * 100 + day
}

/// One day's winning numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub numbers: [u8; PICKS],
    pub bonus: u8,
}

impl Draw {
    /// Deterministic draw for a `yyyymmdd` seed.
    pub fn for_day(seed: u32) -> Self {
        let mut pool: ArrayVec<u8, { MAX_NUMBER as usize }> = (MIN_NUMBER..=MAX_NUMBER).collect();
        SimpleRng::new(seed).shuffle(&mut pool);

        let mut numbers = [0u8; PICKS];
        numbers.copy_from_slice(&pool[..PICKS]);
        numbers.sort_unstable();
        Self {
            numbers,
            bonus: pool[PICKS],
        }
    }

    pub fn matches(&self, ticket: &Ticket) -> usize {
        ticket
            .numbers()
            .iter()
            .filter(|n| self.numbers.contains(n))
            .count()
    }

    /// Score a complete ticket. Incomplete tickets never win.
    pub fn check(&self, ticket: &Ticket) -> CheckResult {
        let matches = self.matches(ticket);
        let bonus_hit = ticket.contains(self.bonus);
        let prize = if ticket.is_complete() {
            Prize::for_matches(matches, bonus_hit)
        } else {
            None
        };
        let has_bonus = match prize {
            Some(Prize::First) | Some(Prize::Third) => false,
            Some(Prize::Second) => true,
            _ => bonus_hit,
        };
        CheckResult {
            matches,
            has_bonus,
            prize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prize {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
}

impl Prize {
    pub fn for_matches(matches: usize, bonus: bool) -> Option<Self> {
        match (matches, bonus) {
            (6, _) => Some(Prize::First),
            (5, true) => Some(Prize::Second),
            (5, false) => Some(Prize::Third),
            (4, _) => Some(Prize::Fourth),
            (3, _) => Some(Prize::Fifth),
            _ => None,
        }
    }

    /// 1 for first prize through 5 for fifth
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    /// Inverse of [`Prize::rank`]; 0 and anything above 5 mean no prize.
    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(Prize::First),
            2 => Some(Prize::Second),
            3 => Some(Prize::Third),
            4 => Some(Prize::Fourth),
            5 => Some(Prize::Fifth),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    pub matches: usize,
    pub has_bonus: bool,
    pub prize: Option<Prize>,
}

impl CheckResult {
    /// Prize rank, or 0 without a prize
    pub fn rank(&self) -> u8 {
        self.prize.map_or(0, |p| p.rank())
    }
}

/// Colour band of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallBand {
    Yellow,
    Blue,
    Red,
    Gray,
    Green,
}

impl BallBand {
    pub fn for_number(n: u8) -> Self {
        match n {
            0..=10 => BallBand::Yellow,
            11..=20 => BallBand::Blue,
            21..=30 => BallBand::Red,
            31..=40 => BallBand::Gray,
            _ => BallBand::Green,
        }
    }
}

/// Seconds left until the next midnight
pub fn seconds_until_midnight(secs_since_midnight: u32) -> u32 {
    SECS_PER_DAY - secs_since_midnight.min(SECS_PER_DAY - 1)
}

/// `HH:MM:SS`
pub fn format_countdown(secs: u32) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}
