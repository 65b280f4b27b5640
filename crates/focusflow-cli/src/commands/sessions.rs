use clap::Subcommand;
use focusflow_core::{SessionStore, SqliteStore};

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List recorded study sessions
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: SessionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let sessions = SessionStore::new(&store).list()?;

    match action {
        SessionsAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&sessions)?);
            } else if sessions.is_empty() {
                println!("No study sessions recorded yet.");
            } else {
                for session in &sessions {
                    println!(
                        "{}  {:>3}m {:02}s  {}",
                        session.date.format("%Y-%m-%d %H:%M"),
                        session.duration_secs / 60,
                        session.duration_secs % 60,
                        session.notes
                    );
                }
            }
        }
    }
    Ok(())
}
