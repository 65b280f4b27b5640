mod countdown;
mod worker;

pub use countdown::{Countdown, TimerEvent};
pub use worker::{TimerCommand, TimerWorker};
