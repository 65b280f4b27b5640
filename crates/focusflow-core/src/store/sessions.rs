//! Append-only study session log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::KeyValueStore;
use crate::error::Result;

const SESSIONS_KEY: &str = "focusflow_sessions";

/// Note recorded when the user skips the post-session reflection prompt.
pub const DEFAULT_SESSION_NOTE: &str = "Completed a study session.";

/// One completed study interval and its free-text reflection.
///
/// Immutable once created; the core never updates or deletes individual
/// records (a bulk import overwrites the whole list).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub duration_secs: u64,
    pub notes: String,
}

/// Store for the session log, backed by a [`KeyValueStore`].
pub struct SessionStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> SessionStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// All recorded sessions in insertion order.
    ///
    /// Corrupt or missing serialized data degrades to an empty list rather
    /// than failing the caller.
    pub fn list(&self) -> Result<Vec<StudySession>> {
        let Some(json) = self.store.get(SESSIONS_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&json) {
            Ok(sessions) => Ok(sessions),
            Err(e) => {
                eprintln!("Warning: discarding unreadable session log: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Append a completed session, assigning a fresh id and timestamp.
    pub fn append(&self, duration_secs: u64, notes: &str) -> Result<StudySession> {
        let mut sessions = self.list()?;
        let session = StudySession {
            id: Uuid::new_v4(),
            date: Utc::now(),
            duration_secs,
            notes: notes.to_string(),
        };
        sessions.push(session.clone());
        self.replace(&sessions)?;
        Ok(session)
    }

    /// Overwrite the whole list. Used by `append` and by bulk import.
    pub(crate) fn replace(&self, sessions: &[StudySession]) -> Result<()> {
        let json = serde_json::to_string(sessions)?;
        self.store.set(SESSIONS_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn list_is_empty_before_first_append() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(&kv);
        assert!(sessions.list().unwrap().is_empty());
    }

    #[test]
    fn append_assigns_id_and_preserves_order() {
        let kv = MemoryStore::new();
        let sessions = SessionStore::new(&kv);

        let first = sessions.append(1500, "Felt focused.").unwrap();
        let second = sessions.append(900, "Got distracted.").unwrap();
        assert_ne!(first.id, second.id);

        let listed = sessions.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].notes, "Felt focused.");
        assert_eq!(listed[1].duration_secs, 900);
    }

    #[test]
    fn corrupt_payload_degrades_to_empty() {
        let kv = MemoryStore::new();
        kv.set("focusflow_sessions", "{not json").unwrap();

        let sessions = SessionStore::new(&kv);
        assert!(sessions.list().unwrap().is_empty());

        // A fresh append recovers the key.
        sessions.append(60, DEFAULT_SESSION_NOTE).unwrap();
        assert_eq!(sessions.list().unwrap().len(), 1);
    }
}
