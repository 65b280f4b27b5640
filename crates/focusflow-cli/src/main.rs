use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "focusflow", version, about = "FocusFlow study companion CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Recorded study sessions
    Sessions {
        #[command(subcommand)]
        action: commands::sessions::SessionsAction,
    },
    /// AI analysis of the study log
    Analyze {
        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// AI mental coach chat
    Chat {
        #[command(subcommand)]
        action: Option<commands::chat::ChatAction>,
    },
    /// Gemini API key management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Backup export and import
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Sessions { action } => commands::sessions::run(action),
        Commands::Analyze { json } => commands::analyze::run(json),
        Commands::Chat { action } => commands::chat::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "focusflow", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
