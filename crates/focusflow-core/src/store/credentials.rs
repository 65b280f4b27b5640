//! Gemini API key storage.
//!
//! The credential lives in the same key-value store as all other state,
//! under `focusflow_api_key`. A missing key is reported by the gateway as
//! [`crate::error::GatewayError::MissingApiKey`] before any network call.

use super::KeyValueStore;
use crate::error::{Result, StorageError};

const API_KEY_STORAGE_KEY: &str = "focusflow_api_key";

/// Store for the Gemini API key.
pub struct ApiKeyStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> ApiKeyStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// The stored key, trimmed. A blank stored value reads as `None`.
    pub fn get(&self) -> Result<Option<String>> {
        let key = self
            .store
            .get(API_KEY_STORAGE_KEY)?
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        Ok(key)
    }

    /// Save a key. Blank input is rejected.
    pub fn set(&self, key: &str) -> Result<()> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return Err(StorageError::QueryFailed("API key must not be blank".into()).into());
        }
        self.store.set(API_KEY_STORAGE_KEY, trimmed)?;
        Ok(())
    }

    /// Forget the stored key.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(API_KEY_STORAGE_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn set_trims_and_get_returns_it() {
        let kv = MemoryStore::new();
        let keys = ApiKeyStore::new(&kv);
        keys.set("  AIza-test-key \n").unwrap();
        assert_eq!(keys.get().unwrap().unwrap(), "AIza-test-key");
    }

    #[test]
    fn blank_key_is_rejected() {
        let kv = MemoryStore::new();
        let keys = ApiKeyStore::new(&kv);
        assert!(keys.set("   ").is_err());
        assert!(keys.get().unwrap().is_none());
    }

    #[test]
    fn clear_forgets_the_key() {
        let kv = MemoryStore::new();
        let keys = ApiKeyStore::new(&kv);
        keys.set("AIza-test-key").unwrap();
        keys.clear().unwrap();
        assert!(keys.get().unwrap().is_none());
    }
}
