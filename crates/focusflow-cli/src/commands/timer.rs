use std::io::{self, Write};

use clap::Subcommand;
use focusflow_core::store::sessions::DEFAULT_SESSION_NOTE;
use focusflow_core::{Config, SessionStore, SqliteStore, TimerEvent, TimerWorker};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a study session to completion
    Run {
        /// Session length in minutes (defaults to the configured duration)
        #[arg(long)]
        minutes: Option<u64>,
        /// Allow a length outside the configured presets
        #[arg(long)]
        free: bool,
    },
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { minutes, free } => run_session(minutes, free),
    }
}

fn run_session(minutes: Option<u64>, free: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let minutes = minutes.unwrap_or(config.timer.duration_min);

    if !free && !config.timer.presets.contains(&minutes) {
        return Err(format!(
            "{minutes} min is not one of the presets {:?}; pass --free to override",
            config.timer.presets
        )
        .into());
    }

    let total_secs = minutes * 60;

    let worker = match TimerWorker::spawn() {
        Ok(worker) => worker,
        Err(e) => {
            // Terminal for this run: no retry, timer controls stay disabled.
            eprintln!("The background timer could not be started; the timer is unavailable.");
            return Err(e.into());
        }
    };

    worker.set_time(total_secs)?;
    worker.start()?;

    for event in worker.events().iter() {
        match event {
            TimerEvent::Tick(remaining) => {
                render_tick(remaining, total_secs);
            }
            TimerEvent::Finished => {
                println!();
                record_session(total_secs)?;
                break;
            }
        }
    }
    Ok(())
}

fn render_tick(remaining: u64, total: u64) {
    let ratio = if total > 0 {
        remaining as f64 / total as f64
    } else {
        0.0
    };
    print!(
        "\r  {}  [{}] {:3.0}%",
        format_mmss(remaining),
        progress_bar(1.0 - ratio, 24),
        (1.0 - ratio) * 100.0
    );
    let _ = io::stdout().flush();
}

fn record_session(total_secs: u64) -> Result<(), Box<dyn std::error::Error>> {
    println!("Session complete! How did it go? (press Enter to skip)");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let notes = match input.trim() {
        "" => DEFAULT_SESSION_NOTE,
        other => other,
    };

    let store = SqliteStore::open()?;
    let session = SessionStore::new(&store).append(total_secs, notes)?;
    println!(
        "Recorded a {} session ({}).",
        format_mmss(session.duration_secs),
        session.date.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio.clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar = "#".repeat(filled);
    bar.push_str(&"-".repeat(width - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mmss_formatting() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(1500), "25:00");
        assert_eq!(format_mmss(3601), "60:01");
    }

    #[test]
    fn progress_bar_is_clamped() {
        assert_eq!(progress_bar(0.0, 4), "----");
        assert_eq!(progress_bar(0.5, 4), "##--");
        assert_eq!(progress_bar(7.0, 4), "####");
    }
}
