use std::cell::RefCell;
use std::rc::Rc;

use scribe::{
    Clock, KeyEvent, ManualClock, NamedKey, Session, Statistics, Status, accuracy,
    words_per_minute,
};
use web_time::Duration;

type Completions = Rc<RefCell<Vec<Statistics>>>;

/// A session on a manual clock that records every completion
fn recorded_session(text: &str) -> (Session<ManualClock>, ManualClock, Completions) {
    let clock = ManualClock::new();
    let completions = Rc::new(RefCell::new(Vec::new()));
    let sink = completions.clone();

    let session = Session::with_clock(text, clock.clone())
        .unwrap()
        .on_complete(move |stats| sink.borrow_mut().push(*stats));

    (session, clock, completions)
}

fn press(session: &mut Session<ManualClock>, key: &str) {
    session.handle_key(&KeyEvent::parse(key));
}

#[test]
fn scenario_correct_passage_in_one_minute() {
    let (mut session, clock, completions) = recorded_session("cat");

    press(&mut session, "c");
    press(&mut session, "a");
    clock.advance(Duration::from_secs(60));
    press(&mut session, "t");

    let completions = completions.borrow();
    assert_eq!(completions.len(), 1);

    let stats = completions[0];
    assert_eq!(stats.counters.correct, 3);
    assert_eq!(stats.counters.incorrect, 0);
    assert_eq!(stats.counters.total, 3);
    assert_eq!(stats.wpm, 1);
    assert_eq!(stats.accuracy, 100);
    assert_eq!(stats.duration, Some(Duration::from_secs(60)));
}

#[test]
fn scenario_one_mistake() {
    let (mut session, _, completions) = recorded_session("cat");

    for key in ["c", "x", "t"] {
        press(&mut session, key);
    }

    assert_eq!(session.status(), Status::Complete);

    let stats = completions.borrow()[0];
    assert_eq!(stats.counters.correct, 2);
    assert_eq!(stats.counters.incorrect, 1);
    assert_eq!(stats.accuracy, 67);
}

#[test]
fn scenario_correction_keeps_attempts() {
    let (mut session, _, completions) = recorded_session("abc");

    for key in ["a", "x", "Backspace", "b"] {
        press(&mut session, key);
    }

    assert_eq!(session.status(), Status::Active);
    assert_eq!(session.cursor(), 2);
    assert_eq!(session.input(), &['a', 'b']);

    let counters = session.counters();
    assert_eq!(counters.total, 3);
    assert_eq!(counters.correct, 2);
    assert_eq!(counters.incorrect, 1);
    assert!(completions.borrow().is_empty());

    press(&mut session, "c");

    let completions = completions.borrow();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].counters.total, 4);
    assert_eq!(completions[0].accuracy, 75);
}

#[test]
fn mistake_on_last_letter_completes() {
    let (mut session, _, completions) = recorded_session("ab");

    press(&mut session, "a");
    press(&mut session, "x");
    assert_eq!(session.status(), Status::Complete);

    // Too late to correct
    press(&mut session, "Backspace");
    press(&mut session, "b");

    assert_eq!(session.input(), &['a', 'x']);
    assert_eq!(session.counters().total, 2);

    let completions = completions.borrow();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].counters.incorrect, 1);
    assert_eq!(completions[0].accuracy, 50);
}

#[test]
fn scenario_modifier_before_typing() {
    let (mut session, _, _) = recorded_session("cat");

    press(&mut session, "Shift");

    assert_eq!(session.status(), Status::Idle);
    assert_eq!(session.started_at(), None);
    assert!(!session.is_ticking());
}

#[test]
fn completion_fires_once_despite_trailing_keys() {
    let (mut session, clock, completions) = recorded_session("hi");

    for key in ["h", "i", "!", "Backspace", "Enter", "x"] {
        press(&mut session, key);
        clock.advance(Duration::from_millis(10));
    }

    assert_eq!(completions.borrow().len(), 1);
    assert_eq!(session.input(), &['h', 'i']);
    assert_eq!(session.final_statistics(), Some(completions.borrow()[0]));
}

#[test]
fn shift_then_typing_starts_once() {
    let (mut session, clock, _) = recorded_session("Holmes");
    let typed_at = clock.now() + Duration::from_millis(30);

    press(&mut session, "Shift");
    clock.advance(Duration::from_millis(30));
    press(&mut session, "H");
    clock.advance(Duration::from_millis(30));
    press(&mut session, "o");

    assert_eq!(session.started_at(), Some(typed_at));
}

#[test]
fn retry_after_completion() {
    let (mut session, clock, completions) = recorded_session("ok");

    press(&mut session, "o");
    press(&mut session, "k");
    session.reset();

    clock.advance(Duration::from_secs(3));
    let restarted_at = clock.now();
    press(&mut session, "o");
    clock.advance(Duration::from_secs(12));
    press(&mut session, "k");

    let completions = completions.borrow();
    assert_eq!(completions.len(), 2);
    assert_eq!(completions[1].started_at, Some(restarted_at));
    assert_eq!(completions[1].duration, Some(Duration::from_secs(12)));
}

#[test]
fn elapsed_display_follows_ticks() {
    let (mut session, clock, _) = recorded_session("elementary");
    press(&mut session, "e");

    let mut ticks = 0;
    for _ in 0..25 {
        clock.advance(Duration::from_millis(50));
        if session.poll() {
            ticks += 1;
        }
    }

    // 1.25 seconds at a 100ms cadence
    assert_eq!(ticks, 12);
    assert_eq!(session.formatted_elapsed(), "00:01");

    // The display is not the source of truth for speed
    let stats = session.statistics();
    assert_eq!(stats.duration, Some(Duration::from_millis(1250)));
}

#[test]
fn boundaries() {
    assert_eq!(accuracy(0, 0), 100);
    assert_eq!(words_per_minute(42, None), 0);
}
