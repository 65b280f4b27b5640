use clap::Subcommand;
use focusflow_core::{ApiKeyStore, SqliteStore};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Save the Gemini API key
    SetKey {
        /// The API key
        key: String,
    },
    /// Show whether a key is stored
    Status,
    /// Forget the stored key
    Clear,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let keys = ApiKeyStore::new(&store);

    match action {
        AuthAction::SetKey { key } => {
            keys.set(&key)?;
            println!("API key saved.");
        }
        AuthAction::Status => match keys.get()? {
            Some(key) => {
                let tail: String = key.chars().rev().take(4).collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                println!("API key: set (....{tail})");
            }
            None => println!("API key: not set"),
        },
        AuthAction::Clear => {
            keys.clear()?;
            println!("API key cleared.");
        }
    }
    Ok(())
}
