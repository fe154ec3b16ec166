//! State store for numlog.
//!
//! `LogStore` owns the single `AppState` and a `KeyValueStore`. Every
//! operation computes a whole new state through [`transitions`], swaps it in,
//! then writes the persisted subset back to storage. A failed write is
//! logged and otherwise ignored: the in-memory state stays authoritative for
//! the session.
//!
//! # Example
//!
//! ```
//! use numlog::storage::MemoryStore;
//! use numlog::store::LogStore;
//!
//! let mut store = LogStore::open(MemoryStore::new(), "state");
//! store.set_new_value_input("72.5").unwrap();
//! store.append_entry().unwrap();
//! assert_eq!(store.state().logs[0].entries.len(), 1);
//! ```

pub mod transitions;

use crate::codec::{LineSeparator, deserialize_state, serialize_state, tsv};
use crate::domain::{AppState, Dialog, Log};
use crate::error::{NumlogError, Result};
use crate::storage::KeyValueStore;
use crate::timestamp;

/// Default storage key for the saved state
pub const STATE_KEY: &str = "state";

pub struct LogStore<S: KeyValueStore> {
    state: AppState,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> std::fmt::Debug for LogStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogStore")
            .field("key", &self.key)
            .field("logs", &self.state.logs.len())
            .field("current_log_index", &self.state.current_log_index)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> LogStore<S> {
    /// Load saved state from `storage`, falling back to the default state
    /// when nothing is saved or the saved text is unusable.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = load_state(&storage, &key);
        Self { state, storage, key }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn current_log(&self) -> Option<&Log> {
        self.state.current_log()
    }

    pub fn set_new_value_input(&mut self, text: &str) -> Result<()> {
        self.apply("set_new_value_input", |s| transitions::set_new_value_input(s, text))
    }

    pub fn select_log(&mut self, index: usize) -> Result<()> {
        self.apply("select_log", |s| transitions::select_log(s, index))
    }

    pub fn create_log(&mut self) -> Result<()> {
        self.apply("create_log", transitions::create_log)
    }

    pub fn rename_current_log(&mut self, new_name: &str) -> Result<()> {
        self.apply("rename_current_log", |s| transitions::rename_current_log(s, new_name))
    }

    /// Delete the current log. Callers are expected to have confirmed with
    /// the user first; see [`LogStore::request_delete`].
    pub fn delete_current_log(&mut self) -> Result<()> {
        self.apply("delete_current_log", transitions::delete_current_log)
    }

    /// Append the pending input to the current log, timestamped now.
    pub fn append_entry(&mut self) -> Result<()> {
        let now = timestamp::now();
        self.apply("append_entry", |s| transitions::append_entry(s, now))
    }

    pub fn import_log(&mut self, filename: &str, text: &str) -> Result<()> {
        self.apply("import_log", |s| transitions::import_log(s, filename, text))
    }

    pub fn open_dialog(&mut self, dialog: Dialog) -> Result<()> {
        self.apply("open_dialog", |s| transitions::open_dialog(s, dialog))
    }

    pub fn close_dialog(&mut self, dialog: Dialog) -> Result<()> {
        self.apply("close_dialog", |s| transitions::close_dialog(s, dialog))
    }

    pub fn set_new_log_name(&mut self, text: &str) -> Result<()> {
        self.apply("set_new_log_name", |s| transitions::set_new_log_name(s, text))
    }

    pub fn begin_rename(&mut self) -> Result<()> {
        self.apply("begin_rename", transitions::begin_rename)
    }

    pub fn commit_rename(&mut self) -> Result<()> {
        self.apply("commit_rename", transitions::commit_rename)
    }

    pub fn request_delete(&mut self) -> Result<()> {
        self.apply("request_delete", transitions::request_delete)
    }

    pub fn confirm_delete(&mut self) -> Result<()> {
        self.apply("confirm_delete", transitions::confirm_delete)
    }

    pub fn cancel_delete(&mut self) -> Result<()> {
        self.apply("cancel_delete", transitions::cancel_delete)
    }

    /// File name and TSV body for the current log.
    pub fn export_current_log(&self, separator: LineSeparator) -> Result<(String, String)> {
        let log = self.current_log().ok_or(NumlogError::NoCurrentLog)?;
        Ok((tsv::export_file_name(log), tsv::export_log(log, separator)))
    }

    fn apply<F>(&mut self, op: &str, transition: F) -> Result<()>
    where
        F: FnOnce(&AppState) -> Result<AppState>,
    {
        match transition(&self.state) {
            Ok(next) => {
                log::debug!("{}: applied", op);
                self.state = next;
                self.persist();
                Ok(())
            }
            Err(e) => {
                log::debug!("{}: no change ({})", op, e);
                Err(e)
            }
        }
    }

    fn persist(&mut self) {
        let result = serialize_state(&self.state).and_then(|text| self.storage.set(&self.key, &text));
        match result {
            Ok(()) => log::debug!("Persisted state under key {:?}", self.key),
            Err(e) => log::error!("Failed to persist state: {}", e),
        }
    }
}

fn load_state<S: KeyValueStore>(storage: &S, key: &str) -> AppState {
    let text = match storage.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => {
            log::info!("No saved state under {:?}, starting fresh", key);
            return AppState::default();
        }
        Err(e) => {
            log::error!("Failed to read saved state: {}", e);
            return AppState::default();
        }
    };

    match deserialize_state(&text) {
        Ok(state) => {
            log::info!("Loaded {} logs from saved state", state.logs.len());
            state
        }
        Err(e) => {
            log::error!("Discarding saved state: {}", e);
            log::debug!("Discarded state text: {}", text);
            AppState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    /// Storage whose writes always fail, like a full quota.
    #[derive(Default)]
    struct FullStore {
        writes: usize,
    }

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&mut self, _key: &str, _text: &str) -> Result<()> {
            self.writes += 1;
            Err(NumlogError::Persistence("quota exceeded".to_string()))
        }
    }

    struct UnreadableStore;

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(NumlogError::Persistence("locked".to_string()))
        }

        fn set(&mut self, _key: &str, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn saved(store: &LogStore<MemoryStore>) -> AppState {
        let text = store.storage().get(STATE_KEY).unwrap().unwrap();
        deserialize_state(&text).unwrap()
    }

    #[test]
    fn test_open_empty_storage_gives_default() {
        let store = LogStore::open(MemoryStore::new(), STATE_KEY);
        assert_eq!(store.state(), &AppState::default());
    }

    #[test]
    fn test_open_corrupt_storage_gives_default() {
        let store = LogStore::open(MemoryStore::with_value(STATE_KEY, "{not json"), STATE_KEY);
        assert_eq!(store.state(), &AppState::default());
    }

    #[test]
    fn test_open_unreadable_storage_gives_default() {
        let store = LogStore::open(UnreadableStore, STATE_KEY);
        assert_eq!(store.state().logs.len(), 1);
    }

    #[test]
    fn test_every_operation_persists() {
        let mut store = LogStore::open(MemoryStore::new(), STATE_KEY);
        store.create_log().unwrap();
        assert_eq!(saved(&store).logs.len(), 2);

        store.rename_current_log("steps").unwrap();
        assert_eq!(saved(&store).logs[1].name, "steps");

        store.set_new_value_input("100").unwrap();
        assert_eq!(saved(&store).new_value, "100");

        store.append_entry().unwrap();
        let persisted = saved(&store);
        assert_eq!(persisted.logs[1].entries.len(), 1);
        assert_eq!(persisted.new_value, "");

        store.select_log(0).unwrap();
        assert_eq!(saved(&store).current_log_index, 0);
    }

    #[test]
    fn test_failed_operation_does_not_persist() {
        let mut store = LogStore::open(MemoryStore::new(), STATE_KEY);
        store.set_new_value_input("abc").unwrap();
        let before = store.storage().get(STATE_KEY).unwrap();

        assert!(matches!(store.append_entry(), Err(NumlogError::InvalidInput(_))));
        assert_eq!(store.storage().get(STATE_KEY).unwrap(), before);
        assert!(store.state().logs[0].entries.is_empty());
    }

    #[test]
    fn test_persistence_failure_keeps_in_memory_change() {
        let mut store = LogStore::open(FullStore::default(), STATE_KEY);
        store.set_new_value_input("5").unwrap();
        store.append_entry().unwrap();

        assert_eq!(store.state().logs[0].entries.len(), 1);
        assert_eq!(store.storage().writes, 2);
    }

    #[test]
    fn test_transient_fields_not_persisted() {
        let mut store = LogStore::open(MemoryStore::new(), STATE_KEY);
        store.begin_rename().unwrap();
        store.set_new_log_name("draft").unwrap();
        assert!(store.state().is_showing(Dialog::Rename));

        let text = store.storage().get(STATE_KEY).unwrap().unwrap();
        assert!(!text.contains("draft"));

        let reopened = LogStore::open(store.into_storage(), STATE_KEY);
        assert!(!reopened.state().is_showing(Dialog::Rename));
        assert_eq!(reopened.state().new_log_name, "");
    }

    #[test]
    fn test_export_current_log() {
        let mut store = LogStore::open(MemoryStore::new(), STATE_KEY);
        store.rename_current_log("weight").unwrap();
        let (name, body) = store.export_current_log(LineSeparator::Lf).unwrap();
        assert_eq!(name, "weight-#.tsv");
        assert_eq!(body, "");
    }

    #[test]
    fn test_export_without_current_log() {
        let mut store = LogStore::open(MemoryStore::new(), STATE_KEY);
        store.delete_current_log().unwrap();
        assert!(matches!(
            store.export_current_log(LineSeparator::Lf),
            Err(NumlogError::NoCurrentLog)
        ));
    }

    #[test]
    fn test_debug_output() {
        let store = LogStore::open(MemoryStore::new(), STATE_KEY);
        let debug = format!("{:?}", store);
        assert!(debug.contains("LogStore"));
        assert!(debug.contains("state"));
    }
}
