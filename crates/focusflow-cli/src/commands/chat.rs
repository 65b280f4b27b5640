use std::io::{self, Write};

use clap::Subcommand;
use focusflow_core::{
    ApiKeyStore, ChatMessage, ChatStore, CoachSession, Config, GatewayError, GeminiClient,
    SqliteStore,
};

#[derive(Subcommand)]
pub enum ChatAction {
    /// Send one message to the coach
    Send {
        /// The message text
        message: Vec<String>,
    },
    /// Delete the stored chat history
    Reset,
}

pub fn run(action: Option<ChatAction>) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        Some(ChatAction::Send { message }) => send_once(&message.join(" ")),
        Some(ChatAction::Reset) => reset(),
        None => interactive(),
    }
}

fn reset() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    ChatStore::new(&store).clear()?;
    println!("Chat history deleted.");
    Ok(())
}

fn send_once(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = text.trim();
    if text.is_empty() {
        return Err("message must not be empty".into());
    }

    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let chat = ChatStore::new(&store);
    let mut transcript = seeded_transcript(&chat)?;

    let api_key = ApiKeyStore::new(&store)
        .get()?
        .ok_or(GatewayError::MissingApiKey)?;
    let client = GeminiClient::new(api_key);
    let mut session = CoachSession::new(client, &config.gateway.chat_model, &transcript);

    let runtime = tokio::runtime::Runtime::new()?;
    let reply = exchange(&runtime, &mut session, &chat, &mut transcript, text)?;
    println!("{reply}");
    Ok(())
}

fn interactive() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = SqliteStore::open()?;
    let chat = ChatStore::new(&store);
    let mut transcript = seeded_transcript(&chat)?;

    let keys = ApiKeyStore::new(&store);
    let api_key = keys.get()?.ok_or(GatewayError::MissingApiKey)?;
    let mut session = CoachSession::new(
        GeminiClient::new(api_key.clone()),
        &config.gateway.chat_model,
        &transcript,
    );

    for message in &transcript {
        render_turn(message);
    }
    println!("(empty line to quit)");

    let runtime = tokio::runtime::Runtime::new()?;
    loop {
        print!("you> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim().to_string();
        if text.is_empty() || text == "exit" {
            break;
        }

        // Rebuild the session if the credential changed underneath us.
        if let Some(current) = keys.get()? {
            if !session.matches_key(&current) {
                session = CoachSession::new(
                    GeminiClient::new(current),
                    &config.gateway.chat_model,
                    &transcript,
                );
            }
        }

        match exchange(&runtime, &mut session, &chat, &mut transcript, &text) {
            Ok(reply) => println!("coach> {reply}"),
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

/// One round trip: persist the user turn optimistically, call the gateway,
/// persist the reply. On failure the pending user turn is rolled back from
/// the stored transcript (the session rolls back its own context).
fn exchange(
    runtime: &tokio::runtime::Runtime,
    session: &mut CoachSession,
    chat: &ChatStore,
    transcript: &mut Vec<ChatMessage>,
    text: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    transcript.push(ChatMessage::user(text));
    chat.replace(transcript)?;

    match runtime.block_on(session.send_timed(text)) {
        Ok((reply, latency)) => {
            transcript.push(ChatMessage::model(reply.clone(), Some(latency)));
            chat.replace(transcript)?;
            Ok(reply)
        }
        Err(e) => {
            transcript.pop();
            chat.replace(transcript)?;
            Err(e.into())
        }
    }
}

fn seeded_transcript(chat: &ChatStore) -> Result<Vec<ChatMessage>, Box<dyn std::error::Error>> {
    let mut transcript = chat.list()?;
    if transcript.is_empty() {
        transcript.push(ChatStore::greeting());
        chat.replace(&transcript)?;
    }
    Ok(transcript)
}

fn render_turn(message: &ChatMessage) {
    match message.role {
        focusflow_core::ChatRole::User => println!("you> {}", message.text),
        focusflow_core::ChatRole::Model => println!("coach> {}", message.text),
    }
}
