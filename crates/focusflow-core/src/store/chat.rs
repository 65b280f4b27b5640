//! Persisted chat transcript.
//!
//! The transcript is an ordered list of turns overwritten wholesale after
//! every change. A fresh transcript is seeded with a model greeting; the
//! greeting is presentation-only and is stripped before the history is sent
//! to the API (see [`crate::gateway::CoachSession`]).

use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::error::Result;

const CHAT_HISTORY_KEY: &str = "focusflow_chat_history";

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the coach conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    /// Response latency in seconds; recorded on model turns only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
            duration_secs: None,
        }
    }

    pub fn model(text: impl Into<String>, duration_secs: Option<f64>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
            duration_secs,
        }
    }
}

/// Store for the chat transcript, backed by a [`KeyValueStore`].
pub struct ChatStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ChatStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The stored transcript in order.
    ///
    /// Corrupt or missing serialized data degrades to an empty list.
    pub fn list(&self) -> Result<Vec<ChatMessage>> {
        let Some(json) = self.store.get(CHAT_HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&json) {
            Ok(messages) => Ok(messages),
            Err(e) => {
                eprintln!("Warning: discarding unreadable chat history: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Overwrite the whole transcript.
    pub fn replace(&self, messages: &[ChatMessage]) -> Result<()> {
        let json = serde_json::to_string(messages)?;
        self.store.set(CHAT_HISTORY_KEY, &json)?;
        Ok(())
    }

    /// Remove the stored transcript (the settings screen's chat reset).
    pub fn clear(&self) -> Result<()> {
        self.store.remove(CHAT_HISTORY_KEY)?;
        Ok(())
    }

    /// Seed message shown when the transcript is empty. Never sent to the
    /// API as history.
    pub fn greeting() -> ChatMessage {
        ChatMessage::model(
            "Hi! I'm your AI mental coach. How are you feeling about your studies today?",
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn replace_then_list_preserves_order_and_latency() {
        let kv = MemoryStore::new();
        let chat = ChatStore::new(&kv);

        let transcript = vec![
            ChatStore::greeting(),
            ChatMessage::user("I can't focus today."),
            ChatMessage::model("Try a short 15 minute session.", Some(1.4)),
        ];
        chat.replace(&transcript).unwrap();

        let listed = chat.list().unwrap();
        assert_eq!(listed, transcript);
        assert_eq!(listed[2].duration_secs, Some(1.4));
    }

    #[test]
    fn clear_removes_the_transcript() {
        let kv = MemoryStore::new();
        let chat = ChatStore::new(&kv);
        chat.replace(&[ChatMessage::user("hello")]).unwrap();

        chat.clear().unwrap();
        assert!(chat.list().unwrap().is_empty());
    }

    #[test]
    fn corrupt_payload_degrades_to_empty() {
        let kv = MemoryStore::new();
        kv.set("focusflow_chat_history", "[{\"role\":").unwrap();
        assert!(ChatStore::new(&kv).list().unwrap().is_empty());
    }

    #[test]
    fn latency_is_omitted_from_user_turns() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert!(!json.contains("duration_secs"));
    }
}
