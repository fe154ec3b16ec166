//! Log record
//!
//! A Log is a named series of entries with a display unit label. Names are
//! not unique; logs are addressed by their position in `AppState::logs`.

use serde::{Deserialize, Serialize};

use super::entry::Entry;

/// Units label used when none is given
pub const DEFAULT_UNITS: &str = "#";

/// Name given to logs created without one
pub const UNNAMED: &str = "unnamed";

fn default_units() -> String {
    DEFAULT_UNITS.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub name: String,
    #[serde(default = "default_units")]
    pub units: String,
    /// Insertion order, not necessarily sorted by time
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl Log {
    /// Create an empty log with default units
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: default_units(),
            entries: Vec::new(),
        }
    }

    /// Create an empty log labelled "unnamed"
    pub fn unnamed() -> Self {
        Self::new(UNNAMED)
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    pub fn with_entries(mut self, entries: Vec<Entry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
