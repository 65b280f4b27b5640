//! Bulk backup export and import.
//!
//! The backup document is one JSON object holding both collections. Import
//! validates everything before the first write, so a rejected document
//! leaves existing data untouched. A field that is absent from the document
//! keeps the stored collection as-is (the original app imports field by
//! field); a document with neither recognizable field is invalid.

use serde::{Deserialize, Serialize};

use super::chat::{ChatMessage, ChatStore};
use super::sessions::{SessionStore, StudySession};
use super::KeyValueStore;
use crate::error::{Result, TransferError};

/// The backup document: `{ "sessions": [...], "chatHistory": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub sessions: Vec<StudySession>,
    #[serde(rename = "chatHistory")]
    pub chat_history: Vec<ChatMessage>,
}

/// What an import replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Number of sessions now stored, if the document carried that field.
    pub sessions: Option<usize>,
    /// Number of chat messages now stored, if the document carried that field.
    pub chat_messages: Option<usize>,
}

/// Export/import over both stores.
pub struct DataTransfer<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> DataTransfer<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Serialize both collections to a pretty-printed backup document.
    pub fn export(&self) -> Result<String> {
        let backup = Backup {
            sessions: SessionStore::new(self.store).list()?,
            chat_history: ChatStore::new(self.store).list()?,
        };
        Ok(serde_json::to_string_pretty(&backup)?)
    }

    /// Parse a backup document and replace the stored collections.
    ///
    /// Each recognized field present and well-formed replaces its collection
    /// wholesale; an absent field leaves the stored collection alone. Both
    /// fields are validated before anything is written, so on error the
    /// stores are unchanged.
    pub fn import(&self, document: &str) -> Result<ImportSummary> {
        let value: serde_json::Value = serde_json::from_str(document)
            .map_err(|e| TransferError::InvalidFormat(e.to_string()))?;
        let obj = value
            .as_object()
            .ok_or_else(|| TransferError::InvalidFormat("expected a JSON object".into()))?;

        let sessions: Option<Vec<StudySession>> = obj
            .get("sessions")
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(|e| TransferError::InvalidFormat(format!("sessions: {e}")))?;
        let chat_history: Option<Vec<ChatMessage>> = obj
            .get("chatHistory")
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(|e| TransferError::InvalidFormat(format!("chatHistory: {e}")))?;

        if sessions.is_none() && chat_history.is_none() {
            return Err(TransferError::InvalidFormat(
                "document contains neither 'sessions' nor 'chatHistory'".into(),
            )
            .into());
        }

        let mut summary = ImportSummary {
            sessions: None,
            chat_messages: None,
        };
        if let Some(sessions) = sessions {
            SessionStore::new(self.store).replace(&sessions)?;
            summary.sessions = Some(sessions.len());
        }
        if let Some(history) = chat_history {
            ChatStore::new(self.store).replace(&history)?;
            summary.chat_messages = Some(history.len());
        }
        Ok(summary)
    }
}
