//! Luck streak: guess which of two buttons hides the win.
//!
//! Each pick is a fair coin flip. A correct pick extends the streak, a wrong
//! pick ends the run. The odds of a streak of `n` are `0.5^n`.

use crate::rng::RandomSource;
use crate::types::Side;

/// Cheer messages, indexed by `min(streak - 1, len - 1)`
pub const CHEERS: [&str; 10] = [
    "Nice!",
    "Cool!",
    "Good!",
    "Great!",
    "Lucky you!",
    "Keep going!",
    "Amazing!",
    "Incredible!",
    "Perfect!",
    "Are you a genius?!",
];

/// What one pick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuckOutcome {
    /// Correct pick; the streak is now `streak`
    Hit { streak: u32 },
    /// Wrong pick; the run ended with `streak`
    Miss { streak: u32, answer: Side },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuckTier {
    Legendary,
    Great,
    Decent,
    Unlucky,
}

impl LuckTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            s if s >= 10 => LuckTier::Legendary,
            s if s >= 5 => LuckTier::Great,
            s if s >= 1 => LuckTier::Decent,
            _ => LuckTier::Unlucky,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            LuckTier::Legendary => "Incredible!",
            LuckTier::Great => "Well done!",
            LuckTier::Decent => "So close!",
            LuckTier::Unlucky => "Try again!",
        }
    }
}

/// One luck-streak run
#[derive(Debug, Clone, Default)]
pub struct LuckGame {
    streak: u32,
    finished: bool,
}

impl LuckGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn restart(&mut self) {
        self.streak = 0;
        self.finished = false;
    }

    /// Pick a side. Returns `None` once the run has ended.
    pub fn choose<R: RandomSource>(&mut self, pick: Side, rng: &mut R) -> Option<LuckOutcome> {
        if self.finished {
            return None;
        }

        let answer = Side::from_index(rng.next_index(2));
        if answer == pick {
            self.streak += 1;
            Some(LuckOutcome::Hit {
                streak: self.streak,
            })
        } else {
            self.finished = true;
            Some(LuckOutcome::Miss {
                streak: self.streak,
                answer,
            })
        }
    }

    /// Only non-zero streaks go to the score board
    pub fn should_submit(&self) -> bool {
        self.finished && self.streak > 0
    }
}

/// Chance of hitting `streak` picks in a row, in percent
pub fn streak_probability_percent(streak: u32) -> f64 {
    0.5f64.powi(streak as i32) * 100.0
}

/// Human readable odds, or `None` for an empty streak.
///
/// One decimal down to 1%, two decimals down to 0.01%, exponent notation below.
pub fn format_probability(streak: u32) -> Option<String> {
    if streak == 0 {
        return None;
    }
    let p = streak_probability_percent(streak);
    Some(if p >= 1.0 {
        format!("{:.1}%", p)
    } else if p >= 0.01 {
        format!("{:.2}%", p)
    } else {
        format!("{:.2e}%", p)
    })
}

/// Message shown after a hit.
///
/// A ranked rival (not `me`) sitting at exactly `streak` is called out by name.
pub fn cheer<'a, I>(streak: u32, me: &str, ranking: I) -> String
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    if let Some(rival) = ranking
        .into_iter()
        .find(|&(name, score)| score == streak as u64 && name != me)
        .map(|(name, _)| name)
    {
        return format!("You passed {}!", rival);
    }
    let idx = (streak.max(1) as usize - 1).min(CHEERS.len() - 1);
    CHEERS[idx].to_string()
}
