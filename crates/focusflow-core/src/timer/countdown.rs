//! Countdown state machine.
//!
//! The countdown is a caller-driven state machine. It does not own a clock -
//! the worker thread (or a test) fires `on_interval()` once per second.
//!
//! ## Event contract
//!
//! ```text
//! set_time(s)      -> Tick(s), countdown stopped
//! start()          -> nothing (arms the interval)
//! pause()          -> nothing (disarms the interval)
//! on_interval()    -> Tick(n-1), plus Finished when the value reaches 0
//! ```
//!
//! Ticks are strictly decreasing by 1. `Finished` fires exactly once per
//! countdown that reaches zero and is always the last event; afterwards the
//! machine has stopped itself and a bare `start()` re-fires `Finished` on the
//! next interval without decrementing below zero.

/// Event emitted by the countdown toward its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Current remaining value, reported once on `set_time` and once per
    /// elapsed second while running.
    Tick(u64),
    /// The countdown reached zero from a running state.
    Finished,
}

/// One-second-resolution countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_secs: u64,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining_secs: 0,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Stop any active countdown and reset to `secs`.
    ///
    /// Always emits an immediate tick carrying the new value.
    pub fn set_time(&mut self, secs: u64) -> TimerEvent {
        self.running = false;
        self.remaining_secs = secs;
        TimerEvent::Tick(secs)
    }

    /// Arm the countdown. Idempotent: a second `start` while running is a
    /// no-op, so at most one interval loop is ever active.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Disarm the countdown, preserving the remaining value.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// One firing of the repeating one-second interval.
    ///
    /// Not running: nothing happens. Running with time left: decrement and
    /// tick. When the value reaches zero (or already was zero), the machine
    /// stops itself and `Finished` is the final event.
    pub fn on_interval(&mut self) -> Vec<TimerEvent> {
        if !self.running {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            events.push(TimerEvent::Tick(self.remaining_secs));
        }
        if self.remaining_secs == 0 {
            self.running = false;
            events.push(TimerEvent::Finished);
        }
        events
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
