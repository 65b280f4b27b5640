//! Background timer engine.
//!
//! The countdown runs on a dedicated OS thread so it keeps wall-clock cadence
//! even when the owning front-end is busy. The two sides share nothing but a
//! pair of channels: commands in, events out. The thread exclusively owns the
//! `Countdown`; the owner derives display state only from received events.
//!
//! ## Message protocol
//!
//! ```text
//! owner -> engine   SetTime(secs) | Start | Pause | Shutdown
//! engine -> owner   Tick(remaining_secs) | Finished
//! ```
//!
//! Commands are applied in send order; events arrive in emission order.
//! Tearing the worker down joins the thread, so no event is delivered after
//! teardown begins.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::countdown::{Countdown, TimerEvent};
use crate::error::TimerError;

/// Command sent from the owner to the worker thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Stop any countdown and reset the remaining value.
    SetTime(u64),
    /// Arm the one-second interval. No-op while already running.
    Start,
    /// Disarm the interval, keeping the remaining value.
    Pause,
    /// Tear the worker down.
    Shutdown,
}

/// Handle to the background countdown thread.
///
/// Dropping the handle (or calling [`TimerWorker::shutdown`]) stops the
/// interval, joins the thread and closes both channels. Creation failure is
/// terminal for the session: the caller must treat the timer as unavailable
/// rather than retry.
pub struct TimerWorker {
    commands: Sender<TimerCommand>,
    events: Receiver<TimerEvent>,
    handle: Option<JoinHandle<()>>,
}

impl TimerWorker {
    /// Spawn the worker with the real one-second interval.
    pub fn spawn() -> Result<Self, TimerError> {
        Self::spawn_with_period(Duration::from_secs(1))
    }

    /// Spawn with a custom interval period. Integration tests use short
    /// periods to run full countdowns in milliseconds.
    pub fn spawn_with_period(period: Duration) -> Result<Self, TimerError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("focusflow-timer".into())
            .spawn(move || run_loop(cmd_rx, event_tx, period))
            .map_err(|source| TimerError::Spawn { source })?;

        Ok(Self {
            commands: cmd_tx,
            events: event_rx,
            handle: Some(handle),
        })
    }

    pub fn set_time(&self, secs: u64) -> Result<(), TimerError> {
        self.send(TimerCommand::SetTime(secs))
    }

    pub fn start(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Start)
    }

    pub fn pause(&self) -> Result<(), TimerError> {
        self.send(TimerCommand::Pause)
    }

    /// Event stream from the engine. Ticks are strictly decreasing by 1;
    /// `Finished` is emitted at most once per countdown and always last.
    pub fn events(&self) -> &Receiver<TimerEvent> {
        &self.events
    }

    /// Tear the worker down, consuming the handle. After this returns the
    /// thread has exited and no event can be observed anymore.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn send(&self, cmd: TimerCommand) -> Result<(), TimerError> {
        self.commands.send(cmd).map_err(|_| TimerError::Disconnected)
    }

    fn teardown(&mut self) {
        let _ = self.commands.send(TimerCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TimerWorker {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Thread body: a `Countdown` plus one repeating interval.
///
/// While running, the loop waits for commands with a deadline and treats the
/// deadline expiring as one interval firing; the deadline advances by whole
/// periods so command traffic does not skew the cadence. While idle it blocks
/// indefinitely - no wake-ups, no polling.
fn run_loop(commands: Receiver<TimerCommand>, events: Sender<TimerEvent>, period: Duration) {
    let mut countdown = Countdown::new();
    let mut deadline = Instant::now();

    loop {
        let received = if countdown.is_running() {
            let now = Instant::now();
            if now >= deadline {
                for event in countdown.on_interval() {
                    if events.send(event).is_err() {
                        return;
                    }
                }
                deadline += period;
                continue;
            }
            match commands.recv_timeout(deadline - now) {
                Ok(cmd) => cmd,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        } else {
            match commands.recv() {
                Ok(cmd) => cmd,
                Err(_) => return,
            }
        };

        match received {
            TimerCommand::SetTime(secs) => {
                let event = countdown.set_time(secs);
                if events.send(event).is_err() {
                    return;
                }
            }
            TimerCommand::Start => {
                if !countdown.is_running() {
                    countdown.start();
                    deadline = Instant::now() + period;
                }
            }
            TimerCommand::Pause => countdown.pause(),
            TimerCommand::Shutdown => return,
        }
    }
}
