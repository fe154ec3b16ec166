//! In-memory storage.

use std::collections::HashMap;

use super::traits::{KeyValueStore, validate_key};
use crate::error::Result;

/// HashMap-backed store with no durability.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one value.
    pub fn with_value(key: impl Into<String>, text: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), text.into());
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, text: &str) -> Result<()> {
        validate_key(key)?;
        self.values.insert(key.to_string(), text.to_string());
        Ok(())
    }
}
