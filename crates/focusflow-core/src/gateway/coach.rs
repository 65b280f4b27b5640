//! Stateful coach chat session.

use indoc::indoc;
use std::time::Instant;

use super::client::{Content, GeminiClient, GenerateContentRequest};
use crate::error::GatewayError;
use crate::store::{ChatMessage, ChatRole};

const SYSTEM_INSTRUCTION: &str = indoc! {"
    You are a friendly and practical AI Mental Coach for students. Your goal is
    to give concise, supportive and actionable advice. Keep your answers short,
    easy to read and to the point. Use a warm, encouraging tone. Do not give
    medical advice. Use markdown formatting if it helps readability.
"};

/// One multi-turn conversation with the coach model.
///
/// The session owns the conversation context the API sees. It is built from
/// the stored transcript minus the seeded greeting (the API requires the
/// history to start with a user turn) and records the credential it was
/// built with, so the owner can rebuild it whenever the active key changes.
pub struct CoachSession {
    client: GeminiClient,
    model: String,
    contents: Vec<Content>,
}

impl CoachSession {
    /// Build a session over an existing transcript.
    pub fn new(client: GeminiClient, model: impl Into<String>, history: &[ChatMessage]) -> Self {
        // Drop the presentation-only greeting so the history starts with a
        // user turn.
        let history = match history.first() {
            Some(first) if first.role == ChatRole::Model => &history[1..],
            _ => history,
        };

        let contents = history
            .iter()
            .map(|msg| match msg.role {
                ChatRole::User => Content::user(msg.text.clone()),
                ChatRole::Model => Content::model(msg.text.clone()),
            })
            .collect();

        Self {
            client,
            model: model.into(),
            contents,
        }
    }

    /// Whether this session was built with the given credential.
    pub fn matches_key(&self, api_key: &str) -> bool {
        self.client.api_key() == api_key
    }

    /// Number of turns in the model-side context.
    pub fn context_len(&self) -> usize {
        self.contents.len()
    }

    /// Send one user message and return the model's reply text.
    ///
    /// The user turn is appended to the context optimistically; on failure it
    /// is removed again, so a retried send does not duplicate it in the
    /// model's context.
    pub async fn send(&mut self, text: &str) -> Result<String, GatewayError> {
        self.contents.push(Content::user(text));

        let request = GenerateContentRequest {
            contents: self.contents.clone(),
            system_instruction: Some(Content {
                role: "system".into(),
                parts: vec![super::client::Part {
                    text: SYSTEM_INSTRUCTION.trim().into(),
                }],
            }),
            generation_config: None,
        };

        match self.client.generate(&self.model, &request).await {
            Ok(reply) => {
                self.contents.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                self.contents.pop();
                Err(e)
            }
        }
    }

    /// [`CoachSession::send`] plus wall-clock latency in seconds, for the
    /// transcript's model turns.
    pub async fn send_timed(&mut self, text: &str) -> Result<(String, f64), GatewayError> {
        let started = Instant::now();
        let reply = self.send(text).await?;
        Ok((reply, started.elapsed().as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_greeting_is_stripped_from_the_context() {
        let client = GeminiClient::new("key");
        let history = vec![
            ChatMessage::model("Hi! How are your studies going?", None),
            ChatMessage::user("Badly."),
            ChatMessage::model("Let's fix that.", Some(1.0)),
        ];
        let session = CoachSession::new(client, "gemini-flash-lite-latest", &history);
        assert_eq!(session.context_len(), 2);
        assert_eq!(session.contents[0].role, "user");
    }

    #[test]
    fn history_already_starting_with_user_is_kept_whole() {
        let client = GeminiClient::new("key");
        let history = vec![
            ChatMessage::user("First question."),
            ChatMessage::model("First answer.", Some(0.5)),
        ];
        let session = CoachSession::new(client, "gemini-flash-lite-latest", &history);
        assert_eq!(session.context_len(), 2);
    }

    #[test]
    fn matches_key_tracks_the_building_credential() {
        let session = CoachSession::new(GeminiClient::new("old-key"), "m", &[]);
        assert!(session.matches_key("old-key"));
        assert!(!session.matches_key("new-key"));
    }

    #[tokio::test]
    async fn failed_send_rolls_back_the_pending_user_turn() {
        // Port 9 is discard; the connection fails before any HTTP exchange.
        let client = GeminiClient::new("key").with_base_url("http://127.0.0.1:9/v1beta/models");
        let mut session = CoachSession::new(client, "gemini-flash-lite-latest", &[]);

        assert!(session.send("are you there?").await.is_err());
        assert_eq!(session.context_len(), 0);
    }
}
