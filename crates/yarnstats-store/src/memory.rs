//! In-memory store

use std::sync::Mutex;
use yarnstats_core::ScriptState;

use crate::{StateStore, StoreError, StoreResult, decode_state, encode_state};

/// Keeps the encoded document in memory. Loads go through the same decoder
/// as the file store, so seeded documents behave like files on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw document, as if it had been read from disk
    pub fn with_document(text: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(text.into())),
        }
    }

    /// The last saved document, if any
    pub fn document(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.document.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> StoreResult<ScriptState> {
        match self.lock().as_deref() {
            Some(text) => decode_state(text),
            None => Err(StoreError::Missing("<memory>".into())),
        }
    }

    fn save(&self, state: &ScriptState) -> StoreResult<()> {
        let bytes = encode_state(state)?;
        let text = String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        *self.lock() = Some(text);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_missing() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap_err().is_missing());
        assert!(store.document().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut state = ScriptState::new();
        state.local_vars.set("polls_total", 3);

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
        assert!(store.document().unwrap().contains("polls_total"));
    }

    #[test]
    fn test_seeded_document() {
        let store = MemoryStore::with_document(r#"{"localVars": 5}"#);
        let state = store.load().unwrap();
        assert!(state.local_vars.is_empty());
    }
}
