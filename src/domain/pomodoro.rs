//! Pomodoro session state machine.
//!
//! The engine sequences work and break phases from a configuration; it
//! owns no clock. The timer loop drives it: ask `next_phase` what to
//! run, run it, then report back through `complete_phase`.

use serde::{Deserialize, Serialize};

/// Pomodoro timing configuration plus the lifetime session counter.
///
/// `completed_work_sessions` is persisted across runs; everything else
/// about an in-flight cycle lives in `PomodoroEngine` and resets when a
/// new cycle starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroConfig {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub sessions_until_long_break: u32,
    /// Lifetime count of completed work sessions
    pub completed_work_sessions: u32,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            sessions_until_long_break: 4,
            completed_work_sessions: 0,
        }
    }
}

/// A single timed interval in the cycle.
///
/// The break kind is computed from the work-session cadence, never
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn is_work(self) -> bool {
        matches!(self, Phase::Work)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "WORK",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
        }
    }
}

/// State machine cycling work and break phases.
pub struct PomodoroEngine {
    config: PomodoroConfig,
    /// True when the next phase to run is a work phase
    work_phase: bool,
    /// Work sessions completed within the current cycle, drives the
    /// long-break cadence. Distinct from the persisted lifetime count.
    session_count: u32,
}

impl PomodoroEngine {
    pub fn new(config: PomodoroConfig) -> Self {
        Self {
            config,
            work_phase: true,
            session_count: 0,
        }
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    /// Lifetime count of completed work sessions
    pub fn completed_work_sessions(&self) -> u32 {
        self.config.completed_work_sessions
    }

    /// Work sessions completed in the current cycle
    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    /// Begin a fresh cycle: next phase is work, cadence counter resets.
    pub fn start_cycle(&mut self) {
        self.work_phase = true;
        self.session_count = 0;
    }

    /// The phase the cycle is about to run and its duration in minutes.
    ///
    /// A break is long when at least one work session has completed and
    /// the cadence counter has reached a multiple of
    /// `sessions_until_long_break`.
    pub fn next_phase(&self) -> (Phase, u32) {
        if self.work_phase {
            (Phase::Work, self.config.work_minutes)
        } else if self.session_count > 0
            && self.session_count % self.config.sessions_until_long_break == 0
        {
            (Phase::LongBreak, self.config.long_break_minutes)
        } else {
            (Phase::ShortBreak, self.config.short_break_minutes)
        }
    }

    /// Advance past the current phase.
    ///
    /// A completed work phase increments both the cadence counter and
    /// the persisted lifetime counter. The phase always flips, whether
    /// the interval ran to the end or not. An aborted cycle never calls
    /// this at all.
    pub fn complete_phase(&mut self, completed: bool) {
        if self.work_phase && completed {
            self.session_count += 1;
            self.config.completed_work_sessions += 1;
        }
        self.work_phase = !self.work_phase;
    }

    /// Partially update the configuration.
    ///
    /// Each provided positive value overwrites the corresponding field;
    /// absent or non-positive values are ignored.
    pub fn configure(
        &mut self,
        work_minutes: Option<i64>,
        short_break_minutes: Option<i64>,
        long_break_minutes: Option<i64>,
        sessions_until_long_break: Option<i64>,
    ) {
        fn apply(field: &mut u32, value: Option<i64>) {
            if let Some(v) = value
                && v > 0
                && let Ok(v) = u32::try_from(v)
            {
                *field = v;
            }
        }

        apply(&mut self.config.work_minutes, work_minutes);
        apply(&mut self.config.short_break_minutes, short_break_minutes);
        apply(&mut self.config.long_break_minutes, long_break_minutes);
        apply(
            &mut self.config.sessions_until_long_break,
            sessions_until_long_break,
        );
    }
}
