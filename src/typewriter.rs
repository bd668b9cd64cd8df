// ⌨️ Typewriter - Text Cycle Animator
// Types a phrase one character at a time, holds it, erases it, holds the empty
// line, then starts over. The cycle never ends on its own.
//
// Two layers:
// - TextCycle: the pure four-phase state machine (what to show, how long to wait)
// - Animator:  binds a TextCycle to a Scheduler and owns the single pending timer

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Dwell time on the empty line before typing resumes.
///
/// Fixed, unlike the other three delays.
pub const PAUSE_AFTER_ERASE: Duration = Duration::from_millis(500);

/// Caret blink half-period. Independent of the typing state.
pub const CARET_BLINK: Duration = Duration::from_millis(530);

// ============================================================================
// PHASE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Appending one character per tick
    Typing,

    /// Full phrase on screen, waiting to erase
    PausedAfterType,

    /// Removing one character per tick
    Erasing,

    /// Empty line on screen, waiting to type again
    PausedAfterErase,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Typing => "typing",
            Phase::PausedAfterType => "paused-after-type",
            Phase::Erasing => "erasing",
            Phase::PausedAfterErase => "paused-after-erase",
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Per-tick delays, in milliseconds (serde friendly)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterTimings {
    #[serde(default = "default_type_speed")]
    pub type_speed_ms: u64,

    #[serde(default = "default_erase_speed")]
    pub erase_speed_ms: u64,

    #[serde(default = "default_pause_after_type")]
    pub pause_after_type_ms: u64,
}

fn default_type_speed() -> u64 {
    150
}

fn default_erase_speed() -> u64 {
    75
}

fn default_pause_after_type() -> u64 {
    2000
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        TypewriterTimings {
            type_speed_ms: default_type_speed(),
            erase_speed_ms: default_erase_speed(),
            pause_after_type_ms: default_pause_after_type(),
        }
    }
}

/// Everything an animator is configured with. Fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub target_text: String,
    pub timings: TypewriterTimings,
}

impl TypewriterConfig {
    pub fn new(target_text: impl Into<String>) -> Self {
        TypewriterConfig {
            target_text: target_text.into(),
            timings: TypewriterTimings::default(),
        }
    }

    pub fn with_timings(mut self, timings: TypewriterTimings) -> Self {
        self.timings = timings;
        self
    }
}

// ============================================================================
// STATE MACHINE
// ============================================================================

/// The four-phase cycle over a fixed target phrase.
///
/// The displayed text is always a prefix of the target, tracked as a count of
/// characters so multi-byte text is never split.
#[derive(Debug, Clone)]
pub struct TextCycle {
    config: TypewriterConfig,
    shown: usize,
    len: usize,
    phase: Phase,
}

impl TextCycle {
    /// Start in `Typing` with an empty prefix
    pub fn new(config: TypewriterConfig) -> Self {
        let len = config.target_text.chars().count();
        let mut cycle = TextCycle {
            config,
            shown: 0,
            len,
            phase: Phase::Typing,
        };
        cycle.settle();
        cycle
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Currently displayed prefix
    pub fn prefix(&self) -> &str {
        let target = &self.config.target_text;
        let end = target
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(target.len());
        &target[..end]
    }

    /// Number of characters currently displayed
    pub fn shown(&self) -> usize {
        self.shown
    }

    /// Drives the caret style only
    pub fn is_typing(&self) -> bool {
        self.phase == Phase::Typing
    }

    /// How long to wait before the next `advance`
    pub fn delay(&self) -> Duration {
        let t = &self.config.timings;
        match self.phase {
            Phase::Typing => Duration::from_millis(t.type_speed_ms),
            Phase::PausedAfterType => Duration::from_millis(t.pause_after_type_ms),
            Phase::Erasing => Duration::from_millis(t.erase_speed_ms),
            Phase::PausedAfterErase => PAUSE_AFTER_ERASE,
        }
    }

    /// Apply one timer fire and return the new phase
    pub fn advance(&mut self) -> Phase {
        match self.phase {
            Phase::Typing => self.shown = (self.shown + 1).min(self.len),
            Phase::PausedAfterType => self.phase = Phase::Erasing,
            Phase::Erasing => self.shown = self.shown.saturating_sub(1),
            Phase::PausedAfterErase => self.phase = Phase::Typing,
        }
        self.settle();
        self.phase
    }

    // A finished stroke parks in the matching pause
    fn settle(&mut self) {
        match self.phase {
            Phase::Typing if self.shown == self.len => self.phase = Phase::PausedAfterType,
            Phase::Erasing if self.shown == 0 => self.phase = Phase::PausedAfterErase,
            _ => {}
        }
    }

    /// One full cycle, from the initial state until it comes back around.
    ///
    /// Each frame is what is displayed and how long it stays. Every cycle is
    /// identical, so a player can loop these frames forever.
    pub fn timeline(config: &TypewriterConfig) -> Vec<Frame> {
        let mut cycle = TextCycle::new(config.clone());
        let start = cycle.phase;
        let mut frames = Vec::with_capacity(cycle.len * 2 + 2);

        loop {
            frames.push(Frame {
                text: cycle.prefix().to_string(),
                phase: cycle.phase,
                typing: cycle.is_typing(),
                delay_ms: cycle.delay().as_millis() as u64,
            });
            cycle.advance();
            if cycle.phase == start && cycle.shown == 0 {
                break;
            }
        }

        frames
    }
}

/// A single step of a precomputed cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub text: String,
    pub phase: Phase,
    pub typing: bool,
    pub delay_ms: u64,
}

// ============================================================================
// SCHEDULING
// ============================================================================

/// A one-shot timer source.
///
/// Whoever owns the scheduler reports a fired timer back to the animator with
/// `Animator::fire`, passing the handle `schedule` returned.
pub trait Scheduler {
    type Handle: Copy + Eq + std::fmt::Debug;

    fn schedule(&mut self, delay: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Drives a TextCycle from a Scheduler.
///
/// `pending` is the only place a handle is stored, and every arm cancels the
/// previous one first, so at most one timer is ever outstanding. Dropping the
/// animator releases it.
pub struct Animator<S: Scheduler> {
    cycle: TextCycle,
    scheduler: S,
    pending: Option<S::Handle>,
}

impl<S: Scheduler> Animator<S> {
    /// Create a stopped animator
    pub fn new(config: TypewriterConfig, scheduler: S) -> Self {
        Animator {
            cycle: TextCycle::new(config),
            scheduler,
            pending: None,
        }
    }

    /// Schedule the first tick. Restarting discards the pending timer.
    pub fn start(&mut self) {
        self.arm();
    }

    /// Cancel the pending timer, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }

    /// Handle a timer fire. Returns false for a handle that is no longer pending.
    pub fn fire(&mut self, handle: S::Handle) -> bool {
        if self.pending != Some(handle) {
            debug!(?handle, "ignoring stale typewriter timer");
            return false;
        }
        self.pending = None;

        let phase = self.cycle.advance();
        debug!(phase = phase.as_str(), prefix = self.cycle.prefix(), "typewriter advanced");

        self.arm();
        true
    }

    fn arm(&mut self) {
        self.stop();
        let handle = self.scheduler.schedule(self.cycle.delay());
        self.pending = Some(handle);
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn prefix(&self) -> &str {
        self.cycle.prefix()
    }

    pub fn phase(&self) -> Phase {
        self.cycle.phase()
    }

    pub fn is_typing(&self) -> bool {
        self.cycle.is_typing()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: Scheduler> Drop for Animator<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId(u64);

/// Single-slot deadline timer for poll-driven loops.
///
/// The loop asks `time_until` how long it may block, then `take_due` to
/// collect a fired timer and hand it to the animator.
#[derive(Debug, Default)]
pub struct DeadlineScheduler {
    next_id: u64,
    armed: Option<(TimerId, Instant)>,
}

impl DeadlineScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.armed.map(|(_, at)| at)
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|at| at.saturating_duration_since(now))
    }

    /// Remove and return the armed timer if its deadline has passed
    pub fn take_due(&mut self, now: Instant) -> Option<TimerId> {
        match self.armed {
            Some((id, at)) if at <= now => {
                self.armed = None;
                Some(id)
            }
            _ => None,
        }
    }
}

impl Scheduler for DeadlineScheduler {
    type Handle = TimerId;

    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.armed = Some((id, Instant::now() + delay));
        id
    }

    fn cancel(&mut self, handle: TimerId) {
        if matches!(self.armed, Some((id, _)) if id == handle) {
            self.armed = None;
        }
    }
}

// ============================================================================
// CARET
// ============================================================================

/// Blinking caret on its own fixed interval
#[derive(Debug, Clone, Copy)]
pub struct Caret {
    origin: Instant,
    interval: Duration,
}

impl Caret {
    pub fn new(origin: Instant) -> Self {
        Caret {
            origin,
            interval: CARET_BLINK,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn interval_ms(&self) -> u128 {
        self.interval.as_millis().max(1)
    }

    /// Visible during even half-periods, starting visible
    pub fn visible_at(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.origin).as_millis();
        (elapsed / self.interval_ms()) % 2 == 0
    }

    /// Time left until the caret toggles
    pub fn until_flip(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.origin).as_millis();
        let left = self.interval_ms() - elapsed % self.interval_ms();
        Duration::from_millis(left as u64)
    }
}

// ============================================================================
// TESTS
// ============================================================================
