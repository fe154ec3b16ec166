//! Application state
//!
//! `AppState` is the whole persisted tree plus two transient fields that
//! belong to the current session only:
//! - `new_log_name`: the rename dialog's text buffer
//! - `is_showing_modal`: which dialogs are open
//!
//! Transient fields are skipped by serde, so they never reach storage and
//! come back empty after a reload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::log_record::Log;

/// Name of the log seeded into a fresh state
pub const INITIAL_LOG_NAME: &str = "initial log";

/// Dialogs the interface may show
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dialog {
    /// Rename the current log
    Rename,
    /// Confirm deletion of the current log
    ConfirmDelete,
    /// Pick a file to import
    Import,
}

impl Dialog {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::ConfirmDelete => "confirmDelete",
            Self::Import => "import",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Raw text of the numeric input, validated only when appended
    pub new_value: String,
    /// Index of the current log; may be out of range (e.g. -1 once every log is deleted)
    pub current_log_index: isize,
    pub logs: Vec<Log>,

    #[serde(skip)]
    pub new_log_name: String,
    #[serde(skip)]
    pub is_showing_modal: BTreeMap<Dialog, bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            new_value: String::new(),
            current_log_index: 0,
            logs: vec![Log::new(INITIAL_LOG_NAME)],
            new_log_name: String::new(),
            is_showing_modal: BTreeMap::new(),
        }
    }
}

impl AppState {
    /// Create the default state with a single empty "initial log".
    pub fn new() -> Self {
        Self::default()
    }

    /// Current index as a position in `logs`, if it points at a log.
    pub fn current_index(&self) -> Option<usize> {
        usize::try_from(self.current_log_index)
            .ok()
            .filter(|&i| i < self.logs.len())
    }

    pub fn current_log(&self) -> Option<&Log> {
        self.current_index().map(|i| &self.logs[i])
    }

    pub fn current_log_mut(&mut self) -> Option<&mut Log> {
        let i = self.current_index()?;
        Some(&mut self.logs[i])
    }

    pub fn is_showing(&self, dialog: Dialog) -> bool {
        self.is_showing_modal.get(&dialog).copied().unwrap_or(false)
    }

    /// Drop the transient fields, leaving only what gets persisted.
    pub fn without_transient(mut self) -> Self {
        self.new_log_name.clear();
        self.is_showing_modal.clear();
        self
    }
}
