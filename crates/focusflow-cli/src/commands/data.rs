use std::path::PathBuf;

use clap::Subcommand;
use focusflow_core::{DataTransfer, SqliteStore};

#[derive(Subcommand)]
pub enum DataAction {
    /// Write a backup of all sessions and chat history
    Export {
        /// Output file (defaults to focusflow_backup_YYYY-MM-DD.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace stored data from a backup file
    Import {
        /// Backup file to read
        file: PathBuf,
    },
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let transfer = DataTransfer::new(&store);

    match action {
        DataAction::Export { out } => {
            let path = out.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "focusflow_backup_{}.json",
                    chrono::Local::now().format("%Y-%m-%d")
                ))
            });
            std::fs::write(&path, transfer.export()?)?;
            println!("Backup written to {}", path.display());
        }
        DataAction::Import { file } => {
            let document = std::fs::read_to_string(&file)?;
            let summary = transfer.import(&document)?;
            match summary.sessions {
                Some(n) => println!("Imported {n} sessions."),
                None => println!("Sessions unchanged."),
            }
            match summary.chat_messages {
                Some(n) => println!("Imported {n} chat messages."),
                None => println!("Chat history unchanged."),
            }
        }
    }
    Ok(())
}
