//! Seven-second timer: start, count in your head, stop as close to 7s as possible.
//!
//! Instants are passed in by the caller so the rules stay deterministic.

use std::time::{Duration, Instant};

/// Target duration in seconds
pub const TARGET_SECS: f64 = 7.0;

/// How close the stop landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerGrade {
    Perfect,
    NearPerfect,
    Great,
    Good,
    Close,
    TooEarly,
    TooLate,
}

impl TimerGrade {
    /// Grade a signed difference from the target (seconds).
    pub fn for_diff(diff: f64) -> Self {
        let abs = diff.abs();
        if abs == 0.0 {
            TimerGrade::Perfect
        } else if abs <= 0.1 {
            TimerGrade::NearPerfect
        } else if abs <= 0.3 {
            TimerGrade::Great
        } else if abs <= 0.5 {
            TimerGrade::Good
        } else if abs <= 1.0 {
            TimerGrade::Close
        } else if diff > 0.0 {
            TimerGrade::TooLate
        } else {
            TimerGrade::TooEarly
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TimerGrade::Perfect => "Perfect!",
            TimerGrade::NearPerfect => "Amazing!",
            TimerGrade::Great => "Well done!",
            TimerGrade::Good => "Not bad!",
            TimerGrade::Close => "So close!",
            TimerGrade::TooEarly | TimerGrade::TooLate => "Try again!",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TimerGrade::Perfect => "you are a master of time!",
            TimerGrade::NearPerfect => "what an instinct!",
            TimerGrade::Great => "pretty accurate!",
            TimerGrade::Good => "a bit more practice!",
            TimerGrade::Close => "give it another go!",
            TimerGrade::TooEarly => "that was too fast!",
            TimerGrade::TooLate => "you waited too long!",
        }
    }
}

/// A finished attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerResult {
    pub elapsed_secs: f64,
    /// `elapsed - 7`; negative means early
    pub diff_secs: f64,
}

impl TimerResult {
    pub fn from_elapsed(elapsed: Duration) -> Self {
        let elapsed_secs = elapsed.as_secs_f64();
        Self {
            elapsed_secs,
            diff_secs: elapsed_secs - TARGET_SECS,
        }
    }

    pub fn grade(&self) -> TimerGrade {
        TimerGrade::for_diff(self.diff_secs)
    }

    /// Distance from the target in whole milliseconds; lower ranks higher.
    pub fn error_millis(&self) -> u64 {
        (self.diff_secs.abs() * 1000.0).round() as u64
    }
}

/// Signed, two decimals: `+0.12s`, `-0.30s`
pub fn format_diff(diff: f64) -> String {
    if diff >= 0.0 {
        format!("+{:.2}s", diff)
    } else {
        format!("{:.2}s", diff)
    }
}

/// Start/stop state machine
#[derive(Debug, Clone, Default)]
pub struct StopwatchGame {
    started_at: Option<Instant>,
}

impl StopwatchGame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Time since start, while running
    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        self.started_at.map(|s| now.saturating_duration_since(s))
    }

    /// One button drives the game: the first press starts, the second stops.
    pub fn toggle(&mut self, now: Instant) -> Option<TimerResult> {
        match self.started_at.take() {
            None => {
                self.started_at = Some(now);
                None
            }
            Some(start) => Some(TimerResult::from_elapsed(now.saturating_duration_since(start))),
        }
    }
}
