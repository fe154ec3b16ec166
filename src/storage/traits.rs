//! Storage trait definitions.

use crate::error::{NumlogError, Result};

/// Text key-value store backing the state store.
pub trait KeyValueStore {
    /// Read the text stored under `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `text` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, text: &str) -> Result<()>;
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(NumlogError::Persistence(format!("invalid storage key: {:?}", key)))
    }
}
