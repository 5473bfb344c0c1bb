//! Minigame rule tests: luck streak, seven-second timer, daily lotto

use std::time::{Duration, Instant};

use luck_arcade::core::lotto::{day_seed, Draw, Prize, Ticket, TicketChange};
use luck_arcade::core::luck::{cheer, format_probability, LuckGame, LuckOutcome};
use luck_arcade::core::timer::{format_diff, StopwatchGame, TimerGrade};
use luck_arcade::core::SimpleRng;
use luck_arcade::types::Side;

#[test]
fn test_luck_run_ends_on_first_miss() {
    let mut rng = SimpleRng::new(11);
    let mut game = LuckGame::new();
    let mut hits = 0;
    loop {
        match game.choose(Side::Left, &mut rng) {
            Some(LuckOutcome::Hit { streak }) => {
                hits += 1;
                assert_eq!(streak, hits);
            }
            Some(LuckOutcome::Miss { streak, answer }) => {
                assert_eq!(streak, hits);
                assert_eq!(answer, Side::Right);
                break;
            }
            None => panic!("run ended without a miss"),
        }
    }
    assert!(game.finished());
    assert_eq!(game.should_submit(), hits > 0);
    assert_eq!(game.choose(Side::Left, &mut rng), None);

    game.restart();
    assert_eq!(game.streak(), 0);
    assert!(!game.finished());
}

#[test]
fn test_luck_messages() {
    assert_eq!(format_probability(2).as_deref(), Some("25.0%"));
    let ranking = vec![("amy".to_string(), 2u64)];
    let msg = cheer(2, "bob", ranking.iter().map(|(n, s)| (n.as_str(), *s)));
    assert_eq!(msg, "You passed amy!");
    // Own entry never counts as a rival.
    let msg = cheer(2, "amy", ranking.iter().map(|(n, s)| (n.as_str(), *s)));
    assert_eq!(msg, "Cool!");
}

#[test]
fn test_timer_exact_stop_is_perfect() {
    let t0 = Instant::now();
    let mut game = StopwatchGame::new();
    assert!(game.toggle(t0).is_none());
    let result = game.toggle(t0 + Duration::from_secs(7)).unwrap();
    assert_eq!(result.diff_secs, 0.0);
    assert_eq!(result.grade(), TimerGrade::Perfect);
    assert_eq!(format_diff(result.diff_secs), "+0.00s");
}

#[test]
fn test_timer_late_and_early_misses() {
    let t0 = Instant::now();
    let mut game = StopwatchGame::new();
    game.toggle(t0);
    let late = game.toggle(t0 + Duration::from_millis(8_500)).unwrap();
    assert_eq!(late.grade(), TimerGrade::TooLate);
    assert_eq!(format_diff(late.diff_secs), "+1.50s");

    game.toggle(t0);
    let early = game.toggle(t0 + Duration::from_millis(4_000)).unwrap();
    assert_eq!(early.grade(), TimerGrade::TooEarly);
    assert_eq!(format_diff(early.diff_secs), "-3.00s");
}

#[test]
fn test_lotto_same_day_same_draw() {
    let seed = day_seed(2026, 10, 19);
    assert_eq!(seed, 20261019);
    assert_eq!(Draw::for_day(seed), Draw::for_day(seed));
    // Not a proof of randomness, just that the date matters.
    let week: Vec<Draw> = (19..26).map(|d| Draw::for_day(day_seed(2026, 10, d))).collect();
    assert!(week.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn test_lotto_winning_ticket_takes_first_prize() {
    let draw = Draw::for_day(day_seed(2026, 1, 1));
    let mut ticket = Ticket::new();
    for &n in draw.numbers.iter() {
        assert_eq!(ticket.toggle(n), TicketChange::Added);
    }
    assert_eq!(ticket.toggle(draw.bonus), TicketChange::Full);

    let result = draw.check(&ticket);
    assert_eq!(result.matches, 6);
    assert_eq!(result.prize, Some(Prize::First));
    assert!(!result.has_bonus);
}
