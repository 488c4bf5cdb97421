use typeblitz::engine::input::Key;
use typeblitz::engine::tier::DifficultyTier;
use typeblitz::generator::dictionary;
use typeblitz::generator::pool::WordPool;
use typeblitz::session::controller::{SessionController, SessionOptions};
use typeblitz::session::events::{Command, EndReason, GameEvent};
use typeblitz::session::mode::GameMode;
use typeblitz::session::state::{SessionPhase, Settings};
use typeblitz::session::timers::TimerKind;
use typeblitz::store::{HighScoreStore, JsonStore, MemoryStore};

fn list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn small_pool() -> WordPool {
    WordPool::new(
        list(&[
            "tree", "lamp", "rock", "fish", "bird", "cake", "door", "frog", "gold", "hill",
            "moon", "nest",
        ]),
        list(&["garden", "pocket", "silver"]),
        list(&["wonderful", "adventure"]),
    )
}

fn start<S: HighScoreStore>(c: &mut SessionController<S>) {
    c.handle(Command::Start);
    c.advance(3_000);
    assert_eq!(c.phase(), SessionPhase::Playing);
}

fn current_word<S: HighScoreStore>(c: &SessionController<S>) -> String {
    c.snapshot()
        .round
        .current_word
        .expect("a word should be showing")
}

fn type_current<S: HighScoreStore>(c: &mut SessionController<S>) {
    for ch in current_word(c).chars() {
        c.handle(Command::Key(Key::Char(ch)));
    }
}

fn count<F: Fn(&GameEvent) -> bool>(events: &[GameEvent], pred: F) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

#[test]
fn typing_apple_scores_five_of_five() {
    let pool = WordPool::new(list(&["apple"]), vec![], vec![]);
    let mut c = SessionController::seeded(
        pool,
        MemoryStore::new(),
        GameMode::Practice(DifficultyTier::Easy),
        SessionOptions::default(),
        1,
    );
    start(&mut c);
    assert_eq!(current_word(&c), "apple");
    for ch in "apple".chars() {
        c.handle(Command::Key(Key::Char(ch)));
    }
    let score = *c.score();
    assert_eq!(score.words_completed, 1);
    assert_eq!(score.total_keystrokes, 5);
    assert_eq!(score.correct_keystrokes, 5);
    assert_eq!(score.accuracy(), 100.0);
}

#[test]
fn wrong_letter_reports_one_mismatch() {
    let pool = WordPool::new(list(&["apple"]), vec![], vec![]);
    let mut c = SessionController::seeded(
        pool,
        MemoryStore::new(),
        GameMode::Practice(DifficultyTier::Easy),
        SessionOptions::default(),
        1,
    );
    start(&mut c);
    c.drain_events();
    c.handle(Command::Key(Key::Char('a')));
    c.handle(Command::Key(Key::Char('x')));

    let events = c.drain_events();
    let mismatches: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::WordMismatch(m) => Some(*m),
            _ => None,
        })
        .collect();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].position, 1);
    assert_eq!(mismatches[0].expected, 'p');
    assert_eq!(mismatches[0].actual, 'x');
    assert_eq!(c.score().total_keystrokes, 2);
    assert_eq!(c.score().correct_keystrokes, 1);
}

#[test]
fn text_field_surface_scores_like_keys() {
    let pool = WordPool::new(list(&["apple"]), vec![], vec![]);
    let mut c = SessionController::seeded(
        pool,
        MemoryStore::new(),
        GameMode::Practice(DifficultyTier::Easy),
        SessionOptions::default(),
        1,
    );
    start(&mut c);
    for value in ["a", "ax", "a", "ap", "app", "appl", "apple"] {
        c.handle(Command::TextInput(value.to_string()));
    }
    let score = *c.score();
    assert_eq!(score.words_completed, 1);
    assert_eq!(score.total_keystrokes, 6);
    assert_eq!(score.correct_keystrokes, 5);
}

#[test]
fn timeless_advances_after_ten_words() {
    let mut c = SessionController::seeded(
        small_pool(),
        MemoryStore::new(),
        GameMode::Timeless,
        SessionOptions::default(),
        9,
    );
    start(&mut c);
    c.drain_events();

    for done in 1..=9 {
        type_current(&mut c);
        assert_eq!(c.session().tier, DifficultyTier::Easy);
        assert_eq!(c.session().words_in_tier, done);
    }
    type_current(&mut c);

    assert_eq!(c.session().tier, DifficultyTier::Medium);
    assert_eq!(c.session().words_in_tier, 0);
    let events = c.drain_events();
    assert_eq!(
        count(&events, |e| matches!(e, GameEvent::TierAdvanced { .. })),
        1
    );
    assert!(events.contains(&GameEvent::TierAdvanced {
        from: DifficultyTier::Easy,
        to: DifficultyTier::Medium,
    }));
    assert_eq!(current_word(&c).len(), 6);
}

#[test]
fn one_minute_limit_times_out_once() {
    let pool = dictionary::bundled().unwrap();
    let mut options = SessionOptions::default();
    options.settings.session_time_limit_minutes = 1;
    let mut c = SessionController::seeded(pool, MemoryStore::new(), GameMode::Timeless, options, 3);
    start(&mut c);
    assert_eq!(c.session().session_time_remaining, Some(60));
    type_current(&mut c);

    c.advance(59_999);
    assert_eq!(c.phase(), SessionPhase::Playing);
    c.advance(1);
    assert_eq!(c.phase(), SessionPhase::Ended(EndReason::TimedOut));

    c.advance(120_000);
    let score = *c.score();
    for ch in "anything".chars() {
        c.handle(Command::Key(Key::Char(ch)));
    }
    c.handle(Command::TextInput("abc".to_string()));
    assert_eq!(*c.score(), score);

    let events = c.drain_events();
    let ended: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::SessionEnded { reason, summary } => Some((*reason, summary.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].0, EndReason::TimedOut);
    assert_eq!(ended[0].1.words_completed, 1);
    assert_eq!(ended[0].1.elapsed_ms, 60_000);
    assert_eq!(ended[0].1.wpm, 1);
}

#[test]
fn external_scheduler_times_out_after_a_minute() {
    let mut options = SessionOptions::default();
    options.settings.session_time_limit_minutes = 1;
    let mut c = SessionController::seeded(small_pool(), MemoryStore::new(), GameMode::Timeless, options, 3);
    c.handle(Command::Start);
    for _ in 0..3 {
        let countdown = c.timer_token(TimerKind::Countdown).unwrap();
        c.on_timer(countdown);
    }
    assert_eq!(c.phase(), SessionPhase::Playing);
    type_current(&mut c);

    for _ in 0..60 {
        let session = c.timer_token(TimerKind::Session).unwrap();
        c.on_timer(session);
    }
    assert_eq!(c.phase(), SessionPhase::Ended(EndReason::TimedOut));
    assert_eq!(c.elapsed_ms(), 60_000);
    assert_eq!(c.wpm(), 1);
    assert_eq!(c.score().words_completed, 1);
}

#[test]
fn settings_apply_from_next_session() {
    let mut c = SessionController::seeded(
        small_pool(),
        MemoryStore::new(),
        GameMode::Timeless,
        SessionOptions::default(),
        2,
    );
    start(&mut c);
    c.handle(Command::UpdateSettings(Settings {
        session_time_limit_minutes: 2,
        sound_enabled: false,
    }));
    assert_eq!(c.session().session_time_remaining, None);

    c.handle(Command::Restart);
    start(&mut c);
    assert_eq!(c.session().session_time_remaining, Some(120));
    assert!(c.timer_token(TimerKind::Session).is_some());
}

#[test]
fn restart_twice_matches_restart_once() {
    let mut c = SessionController::seeded(
        small_pool(),
        MemoryStore::new(),
        GameMode::Timeless,
        SessionOptions::default(),
        4,
    );
    start(&mut c);
    type_current(&mut c);

    c.handle(Command::Restart);
    let once = (c.session().clone(), *c.score(), c.snapshot().round);
    c.handle(Command::Restart);
    let twice = (c.session().clone(), *c.score(), c.snapshot().round);

    assert_eq!(once, twice);
    assert_eq!(once.0.phase, SessionPhase::Idle);
    assert_eq!(once.1.words_completed, 0);
    assert!(!c.has_pending_timers());
}

#[test]
fn quit_during_countdown_ends_session() {
    let mut c = SessionController::seeded(
        small_pool(),
        MemoryStore::new(),
        GameMode::Timeless,
        SessionOptions::default(),
        4,
    );
    c.handle(Command::Start);
    c.advance(1_500);
    c.handle(Command::Quit);
    assert_eq!(c.phase(), SessionPhase::Ended(EndReason::Quit));
    assert_eq!(c.wpm(), 0);
    c.advance(10_000);
    assert_eq!(c.phase(), SessionPhase::Ended(EndReason::Quit));
}

#[test]
fn timer_fired_after_quit_is_ignored() {
    let mut c = SessionController::seeded(
        small_pool(),
        MemoryStore::new(),
        GameMode::Timeless,
        SessionOptions::default(),
        4,
    );
    start(&mut c);
    let word_timer = c.timer_token(TimerKind::Word).unwrap();
    c.handle(Command::Quit);
    c.drain_events();
    let snapshot = c.snapshot();

    c.on_timer(word_timer);
    assert!(c.drain_events().is_empty());
    assert_eq!(c.snapshot(), snapshot);
}

#[test]
fn practice_exhaustion_ends_completed() {
    let pool = WordPool::new(list(&["tree", "lamp"]), list(&["garden"]), vec![]);
    let mut c = SessionController::seeded(
        pool,
        MemoryStore::new(),
        GameMode::Practice(DifficultyTier::Easy),
        SessionOptions::default(),
        6,
    );
    start(&mut c);
    let first = current_word(&c);
    type_current(&mut c);
    assert_ne!(current_word(&c), first);
    type_current(&mut c);
    assert_eq!(c.phase(), SessionPhase::Ended(EndReason::Completed));
    assert_eq!(c.session().tier, DifficultyTier::Easy);
}

#[test]
fn unavailable_store_does_not_block_play() {
    let mut c = SessionController::seeded(
        small_pool(),
        MemoryStore::unavailable(),
        GameMode::Timeless,
        SessionOptions::default(),
        8,
    );
    start(&mut c);
    type_current(&mut c);
    type_current(&mut c);
    assert_eq!(c.score().words_completed, 2);
    assert_eq!(c.session().high_score, 2);
    assert_eq!(c.phase(), SessionPhase::Playing);
}

#[test]
fn high_score_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let mut c = SessionController::seeded(
        small_pool(),
        store,
        GameMode::Practice(DifficultyTier::Medium),
        SessionOptions::default(),
        11,
    );
    start(&mut c);
    type_current(&mut c);
    type_current(&mut c);
    c.handle(Command::Quit);

    let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(
        reopened.get("practice_high_score_medium").unwrap().as_deref(),
        Some("2")
    );
    let c = SessionController::seeded(
        small_pool(),
        reopened,
        GameMode::Practice(DifficultyTier::Medium),
        SessionOptions::default(),
        11,
    );
    assert_eq!(c.session().high_score, 2);

    let other = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let c = SessionController::seeded(
        small_pool(),
        other,
        GameMode::Timeless,
        SessionOptions::default(),
        11,
    );
    assert_eq!(c.session().high_score, 0);
}

#[test]
fn same_seed_shows_same_words() {
    let words = |seed| {
        let mut c = SessionController::seeded(
            small_pool(),
            MemoryStore::new(),
            GameMode::Timeless,
            SessionOptions::default(),
            seed,
        );
        start(&mut c);
        let mut shown = Vec::new();
        for _ in 0..5 {
            shown.push(current_word(&c));
            type_current(&mut c);
        }
        shown
    };
    assert_eq!(words(21), words(21));
}
