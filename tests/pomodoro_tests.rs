//! Pomodoro cycle sequencing tests, driven by a scripted tick source
//! so no real time passes.

use taskdeck::timer::{ScriptedTicks, TickSignal, TimerOutcome, run_countdown};
use taskdeck::{Phase, PomodoroConfig, PomodoroEngine};

/// Drive one phase of the engine through the countdown driver the way
/// the UI does, feeding the outcome back into the engine.
fn drive_phase(engine: &mut PomodoroEngine, source: &mut ScriptedTicks) -> TimerOutcome {
    let (_phase, minutes) = engine.next_phase();
    let outcome = run_countdown(u64::from(minutes) * 60, source, |_| {});
    match outcome {
        TimerOutcome::Finished | TimerOutcome::Skipped => engine.complete_phase(true),
        TimerOutcome::Cancelled => {}
    }
    outcome
}

fn tiny_config() -> PomodoroConfig {
    // 1-minute phases keep the scripted tick counts small
    PomodoroConfig {
        work_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 1,
        sessions_until_long_break: 4,
        completed_work_sessions: 0,
    }
}

#[test]
fn long_break_after_fourth_work_session() {
    let mut engine = PomodoroEngine::new(tiny_config());

    for session in 1..=4 {
        assert_eq!(engine.next_phase().0, Phase::Work);
        let mut ticks = ScriptedTicks::ticks(60);
        assert_eq!(drive_phase(&mut engine, &mut ticks), TimerOutcome::Finished);
        assert_eq!(engine.completed_work_sessions(), session);

        let expected_break = if session == 4 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        };
        assert_eq!(engine.next_phase().0, expected_break);

        let mut ticks = ScriptedTicks::ticks(60);
        drive_phase(&mut engine, &mut ticks);
    }
}

#[test]
fn skipped_work_phase_still_counts() {
    let mut engine = PomodoroEngine::new(tiny_config());

    let mut ticks = ScriptedTicks::new([TickSignal::Tick, TickSignal::Skip]);
    let outcome = drive_phase(&mut engine, &mut ticks);
    assert_eq!(outcome, TimerOutcome::Skipped);

    // Skip advances the cycle and increments the counters just like a
    // natural completion.
    assert_eq!(engine.completed_work_sessions(), 1);
    assert_eq!(engine.session_count(), 1);
    assert_eq!(engine.next_phase().0, Phase::ShortBreak);
}

#[test]
fn abort_ends_the_cycle_without_advancing() {
    let mut engine = PomodoroEngine::new(tiny_config());

    let mut ticks = ScriptedTicks::new([TickSignal::Tick, TickSignal::Cancel]);
    let outcome = drive_phase(&mut engine, &mut ticks);
    assert_eq!(outcome, TimerOutcome::Cancelled);

    assert_eq!(engine.completed_work_sessions(), 0);
    assert_eq!(engine.session_count(), 0);
    // Still on the work phase: nothing advanced
    assert_eq!(engine.next_phase().0, Phase::Work);
}

#[test]
fn new_cycle_resets_cadence_but_not_lifetime_count() {
    let mut engine = PomodoroEngine::new(tiny_config());

    for _ in 0..3 {
        let mut work = ScriptedTicks::ticks(60);
        drive_phase(&mut engine, &mut work);
        let mut rest = ScriptedTicks::ticks(60);
        drive_phase(&mut engine, &mut rest);
    }
    assert_eq!(engine.completed_work_sessions(), 3);

    engine.start_cycle();
    assert_eq!(engine.session_count(), 0);
    assert_eq!(engine.completed_work_sessions(), 3);
    assert_eq!(engine.next_phase().0, Phase::Work);

    // After the fresh cycle's first work session the break is short
    // again, regardless of lifetime count
    let mut ticks = ScriptedTicks::ticks(60);
    drive_phase(&mut engine, &mut ticks);
    assert_eq!(engine.next_phase().0, Phase::ShortBreak);
}

#[test]
fn configure_rejects_non_positive_values() {
    let mut engine = PomodoroEngine::new(PomodoroConfig::default());
    engine.configure(Some(-5), None, None, None);
    assert_eq!(engine.config().work_minutes, 25);

    engine.configure(Some(45), Some(10), Some(20), Some(3));
    let config = engine.config();
    assert_eq!(
        (
            config.work_minutes,
            config.short_break_minutes,
            config.long_break_minutes,
            config.sessions_until_long_break
        ),
        (45, 10, 20, 3)
    );
}
