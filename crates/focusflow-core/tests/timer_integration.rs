//! Timer engine integration tests.
//!
//! These drive the real worker thread through its message protocol, with a
//! short interval period so full countdowns run in milliseconds.

use std::time::Duration;

use focusflow_core::{TimerEvent, TimerWorker};

const PERIOD: Duration = Duration::from_millis(10);
const WAIT: Duration = Duration::from_secs(2);

fn collect_until_finished(worker: &TimerWorker) -> Vec<TimerEvent> {
    let mut events = Vec::new();
    loop {
        match worker.events().recv_timeout(WAIT) {
            Ok(TimerEvent::Finished) => {
                events.push(TimerEvent::Finished);
                return events;
            }
            Ok(event) => events.push(event),
            Err(e) => panic!("countdown never finished: {e}"),
        }
    }
}

#[test]
fn five_second_countdown_emits_the_full_sequence() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.set_time(5).unwrap();
    worker.start().unwrap();

    assert_eq!(
        collect_until_finished(&worker),
        vec![
            TimerEvent::Tick(5),
            TimerEvent::Tick(4),
            TimerEvent::Tick(3),
            TimerEvent::Tick(2),
            TimerEvent::Tick(1),
            TimerEvent::Tick(0),
            TimerEvent::Finished,
        ]
    );
}

#[test]
fn pause_freezes_remaining_until_restarted() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.set_time(60).unwrap();
    assert_eq!(worker.events().recv_timeout(WAIT), Ok(TimerEvent::Tick(60)));

    worker.start().unwrap();
    assert_eq!(worker.events().recv_timeout(WAIT), Ok(TimerEvent::Tick(59)));
    worker.pause().unwrap();

    // Drain whatever was emitted before the pause landed, then expect
    // silence for many periods.
    let mut last_seen = 59;
    while let Ok(TimerEvent::Tick(n)) = worker.events().recv_timeout(PERIOD * 20) {
        assert!(n < last_seen);
        last_seen = n;
    }
    assert!(worker.events().recv_timeout(PERIOD * 20).is_err());

    worker.start().unwrap();
    assert_eq!(
        worker.events().recv_timeout(WAIT),
        Ok(TimerEvent::Tick(last_seen - 1))
    );
}

#[test]
fn set_time_cancels_an_inflight_countdown() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.set_time(30).unwrap();
    worker.start().unwrap();

    // Let a few ticks happen, then reset.
    for _ in 0..3 {
        worker.events().recv_timeout(WAIT).unwrap();
    }
    worker.set_time(30).unwrap();

    // Everything from here on is the reset tick; the countdown is no longer
    // advancing.
    let mut saw_reset = false;
    while let Ok(event) = worker.events().recv_timeout(PERIOD * 20) {
        match event {
            TimerEvent::Tick(30) => saw_reset = true,
            TimerEvent::Tick(n) => assert!(!saw_reset && n < 30, "tick after reset: {n}"),
            TimerEvent::Finished => panic!("finished after reset"),
        }
    }
    assert!(saw_reset);
}

#[test]
fn restart_after_finished_refires_finished_only() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.set_time(1).unwrap();
    worker.start().unwrap();
    collect_until_finished(&worker);

    // No set_time in between: the countdown resumes at zero.
    worker.start().unwrap();
    assert_eq!(
        worker.events().recv_timeout(WAIT),
        Ok(TimerEvent::Finished)
    );
}

#[test]
fn shutdown_while_running_returns_promptly() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.set_time(10_000).unwrap();
    worker.start().unwrap();

    let started = std::time::Instant::now();
    worker.shutdown();
    // The thread was joined; teardown must not wait out the countdown.
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn drop_while_running_joins_the_thread() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.set_time(10_000).unwrap();
    worker.start().unwrap();
    drop(worker);
}

#[test]
fn a_fresh_worker_can_be_spawned_after_teardown() {
    let worker = TimerWorker::spawn_with_period(PERIOD).unwrap();
    worker.shutdown();

    let fresh = TimerWorker::spawn_with_period(PERIOD).unwrap();
    fresh.set_time(1).unwrap();
    assert_eq!(fresh.events().recv_timeout(WAIT), Ok(TimerEvent::Tick(1)));
}
