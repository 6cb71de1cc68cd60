//! Cooperative timer loops.
//!
//! Every timed feature (countdown, stopwatch, task timer, Pomodoro
//! phase) is a blocking poll-render-sleep loop on the main thread: one
//! tick per second, cancellation checked at each tick. The tick source
//! is a trait so the loop drivers run against a scripted source in
//! tests, with no real waiting.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::debug;

/// Tick interval for all timer loops
pub const TICK: Duration = Duration::from_secs(1);

/// What happened while waiting for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSignal {
    /// A full tick interval elapsed
    Tick,
    /// The user cancelled the loop
    Cancel,
    /// The user skipped the rest of the interval (Pomodoro only)
    Skip,
}

/// How key presses map to signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelKeys {
    /// Any key cancels (countdown, stopwatch)
    AnyKey,
    /// Only 'q' cancels (task timer)
    Quit,
    /// 'q' cancels, 's' skips (Pomodoro)
    QuitOrSkip,
}

/// A blocking source of timer ticks
pub trait TickSource {
    /// Block for up to one tick interval, reporting early if the user
    /// intervened.
    fn next_tick(&mut self) -> TickSignal;
}

/// Real tick source: sleeps in terminal-event polls so key presses are
/// seen within the tick, not after it.
pub struct KeyPollTicker {
    keys: CancelKeys,
    interval: Duration,
}

impl KeyPollTicker {
    pub fn new(keys: CancelKeys) -> Self {
        Self {
            keys,
            interval: TICK,
        }
    }

    fn signal_for(&self, code: KeyCode) -> Option<TickSignal> {
        match self.keys {
            CancelKeys::AnyKey => Some(TickSignal::Cancel),
            CancelKeys::Quit => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(TickSignal::Cancel),
                _ => None,
            },
            CancelKeys::QuitOrSkip => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') => Some(TickSignal::Cancel),
                KeyCode::Char('s') | KeyCode::Char('S') => Some(TickSignal::Skip),
                _ => None,
            },
        }
    }
}

impl TickSource for KeyPollTicker {
    fn next_tick(&mut self) -> TickSignal {
        let deadline = Instant::now() + self.interval;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return TickSignal::Tick;
            }
            match event::poll(deadline - now) {
                Ok(true) => {
                    if let Ok(Event::Key(key)) = event::read()
                        && key.kind == KeyEventKind::Press
                        && let Some(signal) = self.signal_for(key.code)
                    {
                        return signal;
                    }
                    // Unmapped event, keep waiting out the tick
                }
                Ok(false) => return TickSignal::Tick,
                Err(e) => {
                    debug!("terminal poll failed: {e}");
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    return TickSignal::Tick;
                }
            }
        }
    }
}

/// Deterministic tick source for tests: replays a fixed script and
/// cancels when it runs out.
pub struct ScriptedTicks {
    signals: VecDeque<TickSignal>,
}

impl ScriptedTicks {
    pub fn new(signals: impl IntoIterator<Item = TickSignal>) -> Self {
        Self {
            signals: signals.into_iter().collect(),
        }
    }

    /// `n` plain ticks
    pub fn ticks(n: usize) -> Self {
        Self::new(std::iter::repeat_n(TickSignal::Tick, n))
    }
}

impl TickSource for ScriptedTicks {
    fn next_tick(&mut self) -> TickSignal {
        self.signals.pop_front().unwrap_or(TickSignal::Cancel)
    }
}

/// Puts the terminal in raw mode for the lifetime of a timer loop so
/// single key presses arrive without Enter.
pub struct RawModeGuard;

impl RawModeGuard {
    pub fn enter() -> Self {
        if let Err(e) = enable_raw_mode() {
            debug!("could not enable raw mode: {e}");
        }
        RawModeGuard
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            debug!("could not disable raw mode: {e}");
        }
    }
}

/// How a timed interval ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Ran to the end of the interval
    Finished,
    /// Cancelled by the user
    Cancelled,
    /// Skipped forward by the user
    Skipped,
}

/// Count down `total_secs`, rendering the remaining seconds before
/// each tick.
pub fn run_countdown<S: TickSource>(
    total_secs: u64,
    source: &mut S,
    mut render: impl FnMut(u64),
) -> TimerOutcome {
    let mut remaining = total_secs;
    while remaining > 0 {
        render(remaining);
        match source.next_tick() {
            TickSignal::Tick => remaining -= 1,
            TickSignal::Cancel => return TimerOutcome::Cancelled,
            TickSignal::Skip => return TimerOutcome::Skipped,
        }
    }
    TimerOutcome::Finished
}

/// Count up until the user stops, returning the elapsed seconds.
pub fn run_stopwatch<S: TickSource>(source: &mut S, mut render: impl FnMut(u64)) -> u64 {
    let mut elapsed = 0;
    loop {
        render(elapsed);
        match source.next_tick() {
            TickSignal::Tick => elapsed += 1,
            TickSignal::Cancel | TickSignal::Skip => return elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_finishes_after_exact_ticks() {
        let mut source = ScriptedTicks::ticks(5);
        let mut renders = Vec::new();
        let outcome = run_countdown(5, &mut source, |remaining| renders.push(remaining));
        assert_eq!(outcome, TimerOutcome::Finished);
        assert_eq!(renders, [5, 4, 3, 2, 1]);
    }

    #[test]
    fn countdown_reports_cancel_mid_way() {
        let mut source = ScriptedTicks::new([
            TickSignal::Tick,
            TickSignal::Tick,
            TickSignal::Cancel,
        ]);
        let outcome = run_countdown(10, &mut source, |_| {});
        assert_eq!(outcome, TimerOutcome::Cancelled);
    }

    #[test]
    fn countdown_reports_skip() {
        let mut source = ScriptedTicks::new([TickSignal::Skip]);
        assert_eq!(run_countdown(10, &mut source, |_| {}), TimerOutcome::Skipped);
    }

    #[test]
    fn zero_length_countdown_finishes_immediately() {
        let mut source = ScriptedTicks::new([]);
        assert_eq!(run_countdown(0, &mut source, |_| {}), TimerOutcome::Finished);
    }

    #[test]
    fn stopwatch_counts_ticks_until_stopped() {
        let mut source = ScriptedTicks::new([
            TickSignal::Tick,
            TickSignal::Tick,
            TickSignal::Tick,
            TickSignal::Cancel,
        ]);
        let mut renders = Vec::new();
        let elapsed = run_stopwatch(&mut source, |e| renders.push(e));
        assert_eq!(elapsed, 3);
        assert_eq!(renders, [0, 1, 2, 3]);
    }

    #[test]
    fn stopwatch_stopped_immediately_reports_zero() {
        let mut source = ScriptedTicks::new([TickSignal::Cancel]);
        assert_eq!(run_stopwatch(&mut source, |_| {}), 0);
    }
}
